//! Error types for ghpm
//!
//! One error enum covers every failure mode: configuration shape problems,
//! invalid milestone input, remote API failures and the wrapped library errors.
//! Uses thiserror for ergonomic error handling.

use crate::github::TransportError;
use thiserror::Error;

/// Result type alias for ghpm operations
pub type Result<T> = std::result::Result<T, GhpmError>;

/// Comprehensive error type for ghpm operations
#[derive(Error, Debug)]
pub enum GhpmError {
    /// Bad configuration shape; aborts before any remote call
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad milestone input; fails the single call it belongs to
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx response from the GitHub API
    #[error("GitHub API error: HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    /// Resource not found on the remote
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors (connect, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl GhpmError {
    /// Whether this error is fatal for the whole invocation rather than for a
    /// single target.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GhpmError::Config(_))
    }
}

impl From<TransportError> for GhpmError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NotFound(path) => GhpmError::NotFound(path),
            TransportError::Status { status, body } => GhpmError::Remote {
                status,
                message: body,
            },
            TransportError::Network(e) => GhpmError::Http(e),
        }
    }
}
