//! Transport abstraction
//!
//! Defines the trait for issuing signed requests against the GitHub REST API.

use async_trait::async_trait;
use reqwest::Method;
use thiserror::Error;

/// Transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected status code {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type for transport operations
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Issues one request and returns the raw 2xx response body.
///
/// `path` is relative to the REST base URL and may carry a query string.
/// Implementations attach authentication and API version headers themselves.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> TransportResult<Vec<u8>>;
}
