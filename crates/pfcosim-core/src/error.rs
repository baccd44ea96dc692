//! Error types for configuration and time handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating simulator configuration or translating time.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid or missing configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Translated case time does not fit the date-time range.
    #[error("case time out of range: {elapsed_seconds}s after {reference}")]
    TimeOutOfRange {
        reference: chrono::DateTime<chrono::Utc>,
        elapsed_seconds: u64,
    },

    /// Failed to read a configuration file.
    #[error("failed to read configuration from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or options payload could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Parse(e.to_string())
    }
}
