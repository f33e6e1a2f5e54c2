//! # Savor Quote CLI
//!
//! Prices one menu selection and reports whether the restaurant is open.
//!
//! ## Usage
//! ```text
//! savor-quote snapshot.json
//! SAVOR_SNAPSHOT=snapshot.json SAVOR_PRETTY=false savor-quote
//! savor-quote --help
//! ```
//!
//! The snapshot's `at` field is the local instant to evaluate. When it is
//! missing, the machine's local clock is used; this binary is the only place
//! that reads wall-clock time.

mod config;
mod error;
mod quote;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::QuoteConfig;
use crate::error::{AppError, AppResult};
use crate::quote::{build_quote, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "savor-quote")]
#[command(about = "Price a menu selection and report opening hours", long_about = None)]
struct Cli {
    /// JSON snapshot: item, hours, discounts, selection and optional `at`
    #[arg(env = "SAVOR_SNAPSHOT", value_name = "SNAPSHOT")]
    snapshot: PathBuf,
}

fn main() -> ExitCode {
    // Missing snapshot or --help exits here with clap's own usage text.
    let cli = Cli::parse();

    let config = match QuoteConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", AppError::from(e));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Quote failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &QuoteConfig) -> AppResult<()> {
    let path = &cli.snapshot;

    debug!(path = %path.display(), "Reading snapshot");
    let raw = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;

    let at = snapshot.at.unwrap_or_else(|| Local::now().naive_local());
    let quote = build_quote(&snapshot, at)?;

    let out = if config.pretty {
        serde_json::to_string_pretty(&quote)?
    } else {
        serde_json::to_string(&quote)?
    };
    println!("{}", out);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `SAVOR_LOG=savor_core=trace` - Trace schedule decisions
/// - Default: [`config::DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so stdout carries only the JSON quote.
fn init_tracing(config: &QuoteConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_snapshot() {
        let cli = Cli::try_parse_from(["savor-quote", "demos/burger.json"]).unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("demos/burger.json"));
    }

    #[test]
    fn test_missing_snapshot_and_help_handled_by_clap() {
        if std::env::var_os("SAVOR_SNAPSHOT").is_none() {
            let err = Cli::try_parse_from(["savor-quote"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        }

        let err = Cli::try_parse_from(["savor-quote", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("SAVOR_SNAPSHOT"));
    }
}
