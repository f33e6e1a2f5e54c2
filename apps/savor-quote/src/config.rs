//! Quote CLI configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Default tracing filter when neither `RUST_LOG` nor `SAVOR_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,savor_core=debug,savor_quote=debug";

/// Quote CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Tracing filter directive (`SAVOR_LOG`). `RUST_LOG` still wins.
    pub log_filter: String,

    /// Pretty-print the JSON quote (`SAVOR_PRETTY`)
    pub pretty: bool,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            pretty: true,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = QuoteConfig::default();

        if let Some(filter) = lookup("SAVOR_LOG") {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue("SAVOR_LOG".to_string()));
            }
            config.log_filter = filter;
        }

        if let Some(pretty) = lookup("SAVOR_PRETTY") {
            config.pretty = pretty
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SAVOR_PRETTY".to_string()))?;
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = QuoteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(config.pretty);
    }

    #[test]
    fn test_overrides() {
        let config = QuoteConfig::from_lookup(lookup(&[
            ("SAVOR_LOG", "warn"),
            ("SAVOR_PRETTY", "false"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "warn");
        assert!(!config.pretty);
    }

    #[test]
    fn test_invalid_bool() {
        let err = QuoteConfig::from_lookup(lookup(&[("SAVOR_PRETTY", "yes please")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SAVOR_PRETTY");
    }
}
