//! Error types for the oracle relay

use std::path::Path;

use thiserror::Error;

/// Relay errors
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid offset in {path}: {reason}")]
    InvalidOffset { path: String, reason: String },

    #[error("Offset regression: last committed {committed}, attempted {attempted}")]
    OffsetRegression { committed: u64, attempted: u64 },

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Invalid digest size: expected {expected} bytes, got {actual}")]
    InvalidDigestSize { expected: usize, actual: usize },

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Invalid signature encoding: {0}")]
    InvalidSignature(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RelayError {
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        RelayError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn invalid_offset(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        RelayError::InvalidOffset {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for RelayError {
    fn from(err: config::ConfigError) -> Self {
        RelayError::ConfigError(err.to_string())
    }
}

impl From<rsa::Error> for RelayError {
    fn from(err: rsa::Error) -> Self {
        RelayError::Signing(err.to_string())
    }
}

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
