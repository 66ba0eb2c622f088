//! reqwest-backed transport

use super::transport::{Transport, TransportError, TransportResult};
use crate::{GhpmError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

/// Public GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Value of the `X-GitHub-Api-Version` header sent with every request
pub const API_VERSION: &str = "2022-11-28";
/// Per-request deadline; a call that exceeds it fails for its target only
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Derive the REST base URL from a configured GitHub URL.
///
/// `https://github.com` maps to the public API, an explicit API URL is kept
/// as-is and any other host is treated as GitHub Enterprise (`/api/v3`).
/// Hosts are compared exactly, so `mygithub.com` is an Enterprise host.
pub fn rest_base_url(url: &str) -> String {
    let base_url = url.trim_end_matches('/');
    let host = Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase));

    match host.as_deref() {
        Some("api.github.com") => base_url.to_string(),
        Some("github.com") | Some("www.github.com") => DEFAULT_API_URL.to_string(),
        _ if base_url.ends_with("/api/v3") => base_url.to_string(),
        _ => format!("{}/api/v3", base_url),
    }
}

fn build_client(timeout: Duration) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_static(concat!("ghpm/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        "x-github-api-version",
        header::HeaderValue::from_static(API_VERSION),
    );

    Ok(Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?)
}

/// Transport that signs requests with a bearer token
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpTransport {
    /// Create a transport for the given API URL and token
    ///
    /// Returns an error if the token is empty or the HTTP client cannot be
    /// created.
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(GhpmError::Config("GitHub token is empty".to_string()));
        }

        Ok(Self {
            client: build_client(REQUEST_TIMEOUT)?,
            base_url: rest_base_url(api_url),
            token,
        })
    }

    /// Replace the per-request deadline (default [`REQUEST_TIMEOUT`])
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> TransportResult<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "GitHub request");

        let mut request = self.client.request(method, &url).bearer_auth(&self.token);
        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        match status {
            StatusCode::NOT_FOUND => Err(TransportError::NotFound(path.to_string())),
            status => {
                let error_body = response.text().await.unwrap_or_default();
                Err(TransportError::Status {
                    status: status.as_u16(),
                    body: error_body,
                })
            }
        }
    }
}
