//! Writer configuration.
//!
//! # Responsibility
//! - Describe where the database lives and how the connection is tuned.
//! - Parse caller-supplied JSON configuration with stable defaults.
//!
//! # Invariants
//! - A parsed config always carries a supported log level.

use crate::logging::{default_log_level, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Storage target for a writer connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum DatabaseLocation {
    /// Private in-memory database, discarded on close.
    Memory,
    /// Database file on local disk, created when missing.
    File(PathBuf),
}

/// Connection and logging settings for one writer instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub database: DatabaseLocation,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,
    pub log_level: String,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            database: DatabaseLocation::Memory,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl WriterConfig {
    /// Config for a database file with default tuning.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// Config for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Parses a JSON document; missing keys fall back to defaults.
    ///
    /// # Errors
    /// - `ConfigError::Parse` when the document is not valid config JSON.
    /// - `ConfigError::Invalid` when `log_level` is unsupported.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.log_level = normalize_level(&config.log_level)
            .map_err(ConfigError::Invalid)?
            .to_string();
        Ok(config)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Short label used in log events; never includes the file path.
    pub(crate) fn mode(&self) -> &'static str {
        match self.database {
            DatabaseLocation::Memory => "memory",
            DatabaseLocation::File(_) => "file",
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid writer config: {err}"),
            Self::Invalid(message) => write!(f, "invalid writer config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}
