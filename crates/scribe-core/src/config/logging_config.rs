//! Logging configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,
    /// Whether to log to file
    #[serde(default)]
    pub log_to_file: bool,
    /// Log file path
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Whether to log to console
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// Log format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_to_file: false,
            log_file: None,
            log_to_console: true,
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    /// Merge with another logging config
    pub fn merge(&mut self, other: LoggingConfig) {
        if !other.level.is_empty() {
            self.level = other.level;
        }

        self.log_to_file = other.log_to_file;

        if other.log_file.is_some() {
            self.log_file = other.log_file;
        }

        self.log_to_console = other.log_to_console;

        if !other.format.is_empty() {
            self.format = other.format;
        }
    }

    /// The log file to write to, if file logging is enabled
    ///
    /// Falls back to `~/.scribe/logs/scribe.log` when no path is configured.
    pub fn effective_log_file(&self) -> Option<PathBuf> {
        if !self.log_to_file {
            return None;
        }
        self.log_file.clone().or_else(|| {
            dirs::home_dir().map(|home| home.join(".scribe").join("logs").join("scribe.log"))
        })
    }
}
