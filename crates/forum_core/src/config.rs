//! Runtime configuration for forum core hosts.
//!
//! # Responsibility
//! - Describe where logs go and which database file backs the store.
//! - Load that description from JSON or `FORUM_*` environment variables.
//!
//! # Invariants
//! - A validated config carries a normalized log level and, if set, an
//!   absolute log directory.
//! - `db_path = None` means a private in-memory database.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use rusqlite::Connection;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "FORUM_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "FORUM_LOG_DIR";
pub const ENV_DB_PATH: &str = "FORUM_DB_PATH";

#[derive(Debug)]
pub enum ConfigError {
    /// Input is not valid config JSON.
    Parse(serde_json::Error),
    /// A field has an unusable value.
    Invalid { field: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::Invalid { field, message } => write!(f, "invalid config `{field}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite database file. In-memory when unset.
    pub db_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON document; missing fields use defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Reads `FORUM_LOG_LEVEL`, `FORUM_LOG_DIR` and `FORUM_DB_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        let config = Self {
            log_level: non_empty(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: non_empty(ENV_LOG_DIR).map(PathBuf::from),
            db_path: non_empty(ENV_DB_PATH).map(PathBuf::from),
        };
        config.validate()
    }

    /// Normalizes the log level and checks the log directory.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(&self.log_level)
            .map_err(|message| ConfigError::Invalid {
                field: "log_level",
                message,
            })?
            .to_string();

        if let Some(dir) = &self.log_dir {
            let text = dir.to_str().ok_or_else(|| ConfigError::Invalid {
                field: "log_dir",
                message: "path is not valid UTF-8".to_string(),
            })?;
            self.log_dir = Some(normalize_log_dir(text).map_err(|message| {
                ConfigError::Invalid {
                    field: "log_dir",
                    message,
                }
            })?);
        }

        Ok(self)
    }
}

/// Opens the database described by `config`, falling back to in-memory.
pub fn open_configured_db(config: &CoreConfig) -> DbResult<Connection> {
    match &config.db_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
}
