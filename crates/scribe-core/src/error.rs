//! Error types for Scribe

use thiserror::Error;

/// Result type alias for Scribe operations
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Main error type for Scribe
#[derive(Error, Debug, Clone)]
pub enum ScribeError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path validation errors
    #[error("Path error: {0}")]
    Path(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl ScribeError {
    /// Create a new path validation error
    pub fn path(message: impl Into<String>) -> Self {
        Self::Path(message.into())
    }
}

impl From<anyhow::Error> for ScribeError {
    fn from(error: anyhow::Error) -> Self {
        Self::Other(error.to_string())
    }
}

impl From<std::io::Error> for ScribeError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for ScribeError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<toml::de::Error> for ScribeError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(error.to_string())
    }
}
