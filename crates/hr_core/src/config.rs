//! Runtime configuration resolved from environment variables.
//!
//! | Variable       | Meaning                          | Default                 |
//! |----------------|----------------------------------|-------------------------|
//! | `HR_LOG_LEVEL` | log level, `trace` to `error`   | [`default_log_level`]   |
//! | `HR_LOG_DIR`   | absolute directory for log files | unset: no file logging  |
//! | `HR_DB_PATH`   | SQLite file for the record store | unset: in-memory store  |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const LOG_LEVEL_VAR: &str = "HR_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "HR_LOG_DIR";
pub const DB_PATH_VAR: &str = "HR_DB_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_VAR}: {message}"),
            Self::InvalidLogDir(message) => write!(f, "{LOG_DIR_VAR}: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };
        let log_dir = read(LOG_DIR_VAR)
            .map(|raw| normalize_log_dir(PathBuf::from(raw).as_path()))
            .transpose()
            .map_err(ConfigError::InvalidLogDir)?;
        let db_path = read(DB_PATH_VAR).map(PathBuf::from);

        Ok(Self {
            log_level,
            log_dir,
            db_path,
        })
    }
}
