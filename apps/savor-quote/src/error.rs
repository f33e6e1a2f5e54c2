//! Error types for the quote CLI.

use savor_core::CoreError;

use crate::config::ConfigError;

/// Everything that can stop the CLI from producing a quote.
///
/// A rejected selection is NOT an error here: it is a normal quote outcome
/// and is reported inside the JSON output.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rejected record: {0}")]
    Core(#[from] CoreError),
}

pub type AppResult<T> = Result<T, AppError>;
