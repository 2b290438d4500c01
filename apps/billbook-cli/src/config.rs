//! CLI configuration module.
//!
//! Configuration is loaded from environment variables (after `.env` has been
//! read by `main`) with fallback to defaults.

use std::env;
use std::path::PathBuf;

/// Default SQLite file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "billbook.db";

/// Default tracing filter when neither `RUST_LOG` nor `BILLBOOK_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// SQLite database file (`BILLBOOK_DATABASE_PATH`)
    pub database_path: PathBuf,

    /// Pool size (`BILLBOOK_MAX_CONNECTIONS`, default 5)
    pub max_connections: u32,

    /// tracing filter directive (`BILLBOOK_LOG`)
    pub log_filter: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_connections = match non_blank("BILLBOOK_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("BILLBOOK_MAX_CONNECTIONS".to_string()))?,
            None => 5,
        };

        Ok(CliConfig {
            database_path: non_blank("BILLBOOK_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            max_connections,
            log_filter: non_blank("BILLBOOK_LOG")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
