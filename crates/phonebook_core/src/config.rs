//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path and logging settings once at startup.
//!
//! # Invariants
//! - Blank variables fall back to defaults.
//! - Resolved `log_level` is always one accepted by `init_logging`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PHONEBOOK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "PHONEBOOK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PHONEBOOK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "phonebook.db";
const DEFAULT_LOG_DIR_NAME: &str = "phonebook-logs";

/// Settings needed to start a phone book session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel { source_name: String, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel {
                source_name,
                message,
            } => write!(f, "{source_name}: {message}"),
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(raw) => parse_level(LOG_LEVEL_ENV, &raw)?,
            None => default_log_level(),
        };
        let log_dir = read(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Replaces the log level, e.g. from a command-line flag.
    pub fn set_log_level(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.log_level = parse_level("--log-level", raw)?;
        Ok(())
    }
}

fn parse_level(source_name: &str, raw: &str) -> Result<&'static str, ConfigError> {
    normalize_level(raw).map_err(|message| ConfigError::InvalidLogLevel {
        source_name: source_name.to_string(),
        message,
    })
}
