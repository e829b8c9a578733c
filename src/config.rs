//! Configuration module for the example helpers
//!
//! An optional TOML file tunes the connection and logging set up by the
//! example programs. Every field has a default, so an empty file is valid.

use crate::error::{EngineError, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Log file used when none is configured
pub const DEFAULT_LOG_FILE: &str = "example.log";

/// Log target passed to connections created by the factory
pub const DEFAULT_LOG_TARGET: &str = "ovirt_helpers";

/// Connection tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Request timeout in seconds (0 = wait forever)
    #[serde(default)]
    pub timeout: u64,
    /// Log target for connection traces
    #[serde(default = "default_log_target")]
    pub log_target: String,
    /// Extra headers sent with every API request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ConnectionConfig {
    /// Request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout: 0,
            log_target: default_log_target(),
            headers: BTreeMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written to the log file
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to log file
    #[serde(default = "default_log_file")]
    pub filename: PathBuf,
}

impl LoggingConfig {
    /// Parse the configured level
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| EngineError::Config(format!("Unknown log level '{}'", self.level)))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            filename: default_log_file(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Connection tuning
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {e}")))?;

        let config = <Self as FromStr>::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.logging.level_filter()?;

        if self.logging.filename.as_os_str().is_empty() {
            return Err(EngineError::Config(
                "Log file name cannot be empty".to_string(),
            ));
        }

        if self.connection.log_target.is_empty() {
            return Err(EngineError::Config(
                "Log target cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = EngineError;

    fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EngineError::Config(format!("Failed to parse TOML: {e}")))
    }
}

// Default value functions for serde
fn default_log_target() -> String {
    DEFAULT_LOG_TARGET.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}
