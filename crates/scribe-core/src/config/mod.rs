//! Configuration
//!
//! Loaded from a TOML file (explicit path or `~/.scribe/config.toml`), with
//! the log level overridable through the `SCRIBE_LOG` environment variable.

mod logging_config;

pub use logging_config::LoggingConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ScribeResult;

/// Environment variable overriding the configured log level
pub const LOG_LEVEL_ENV: &str = "SCRIBE_LOG";

fn default_stream_capacity() -> usize {
    256
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Session stream buffer capacity
    #[serde(default = "default_stream_capacity")]
    pub stream_capacity: usize,

    /// Glob patterns always excluded from context includes
    #[serde(default)]
    pub file_exclude_glob_list: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stream_capacity: default_stream_capacity(),
            file_exclude_glob_list: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// The file's logging section is layered over the defaults, so an
    /// explicitly empty `level` or `format` keeps the default instead of
    /// producing an unusable filter.
    pub fn load_from_file(path: &Path) -> ScribeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        let mut logging = LoggingConfig::default();
        logging.merge(config.logging);
        config.logging = logging;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from the default location, or defaults if absent
    ///
    /// The default location is `~/.scribe/config.toml`.
    pub fn load() -> ScribeResult<Self> {
        match Self::default_config_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => {
                let mut config = Self::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    /// The default configuration file path, if a home directory exists
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".scribe").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.stream_capacity, 256);
        assert!(config.file_exclude_glob_list.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
stream_capacity = 64
file_exclude_glob_list = ["*.lock", "target/**"]

[logging]
level = "debug"
log_to_console = false
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.stream_capacity, 64);
        assert_eq!(config.file_exclude_glob_list, vec!["*.lock", "target/**"]);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.log_to_console);
    }

    #[test]
    fn test_load_from_file_partial() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "stream_capacity = 8\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.stream_capacity, 8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file_empty_level_keeps_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[logging]
level = ""
format = ""
log_to_file = true
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.logging.log_to_file);
    }

    #[test]
    fn test_load_from_file_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "stream_capacity = \"not a number\"\n").unwrap();

        assert!(Config::load_from_file(&path).is_err());
    }
}
