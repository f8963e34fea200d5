//! Environment-driven runtime configuration.
//!
//! Variables:
//! - `UNIVERSITY_DB_PATH`: SQLite file; unset means an in-memory database.
//! - `UNIVERSITY_LOG_LEVEL`: `trace|debug|info|warn|error`.
//! - `UNIVERSITY_LOG_DIR`: absolute directory for rolling log files; unset
//!   disables file logging.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "UNIVERSITY_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "UNIVERSITY_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "UNIVERSITY_LOG_DIR";

/// Runtime settings shared by the CLI and embedding callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(level) => write!(f, "{LOG_LEVEL_VAR} has invalid value `{level}`"),
            Self::RelativeLogDir(dir) => write!(
                f,
                "{LOG_DIR_VAR} must be an absolute path, got `{}`",
                dir.display()
            ),
        }
    }
}

impl Error for ConfigError {}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(level) => parse_log_level(&level)?,
            None => default_log_level(),
        };

        let log_dir = read(LOG_DIR_VAR).map(PathBuf::from);
        if let Some(dir) = log_dir.as_ref().filter(|dir| !dir.is_absolute()) {
            return Err(ConfigError::RelativeLogDir(dir.clone()));
        }

        Ok(Self {
            db_path: read(DB_PATH_VAR).map(PathBuf::from),
            log_level,
            log_dir,
        })
    }

    /// Replaces the log level, e.g. from a command-line flag.
    ///
    /// The level is validated even when no log directory is configured.
    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        self.log_level = parse_log_level(level)?;
        Ok(())
    }
}

fn parse_log_level(level: &str) -> Result<&'static str, ConfigError> {
    normalize_level(level).map_err(|_| ConfigError::InvalidLogLevel(level.trim().to_string()))
}
