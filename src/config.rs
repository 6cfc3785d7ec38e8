//! Configuration Module
//!
//! This module defines the configuration structures for the audit binary.
//! Configuration is loaded from TOML files and parsed using serde.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
///
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [audit]
/// history_path = "history.json"
/// stop_on_first_failure = false
///
/// [logging]
/// filter = "info"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub audit: AuditConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Audit replay configuration
///
/// # Fields
/// - `history_path`: JSON file holding the exported signed transitions, oldest first
/// - `stop_on_first_failure`: Halt replay at the first rejected or conflicting transition
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    pub history_path: PathBuf,
    #[serde(default)]
    pub stop_on_first_failure: bool,
}

/// Logging configuration
///
/// `filter` uses `tracing_subscriber::EnvFilter` directive syntax, e.g. `"info"` or
/// `"resident_registry::validation=debug"`. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
