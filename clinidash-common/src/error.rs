//! Common error types for the clinic dashboard

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for dashboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the dashboard crates
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset storage unavailable (missing file, permission denied, ...)
    #[error("Failed to read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset bytes are not well-formed JSON of the expected shape
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for failures caused by the storage layer rather than the content
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Error::Read { .. })
    }

    /// True for failures caused by malformed dataset content
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}
