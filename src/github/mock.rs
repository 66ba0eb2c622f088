//! In-memory transport for unit tests

use super::transport::{Transport, TransportError, TransportResult};
use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Canned reply for one route
#[derive(Debug, Clone)]
pub(crate) enum MockReply {
    Json(serde_json::Value),
    NotFound,
    Status(u16, String),
}

/// A request as the mock saw it
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Routes exact (method, path) pairs to canned replies and records every call.
/// Unknown routes answer 404.
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: HashMap<(Method, String), MockReply>,
    delays: Vec<(String, Duration)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, method: Method, path: impl Into<String>, reply: MockReply) -> Self {
        self.routes.insert((method, path.into()), reply);
        self
    }

    /// Delay every request whose path starts with `prefix`
    pub fn with_delay(mut self, prefix: impl Into<String>, delay: Duration) -> Self {
        self.delays.push((prefix.into(), delay));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> TransportResult<Vec<u8>> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.clone(),
            path: path.to_string(),
            body,
        });

        let delay = self
            .delays
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(_, d)| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.routes.get(&(method, path.to_string())) {
            Some(MockReply::Json(value)) => Ok(serde_json::to_vec(value).unwrap()),
            Some(MockReply::Status(status, body)) => Err(TransportError::Status {
                status: *status,
                body: body.clone(),
            }),
            Some(MockReply::NotFound) | None => Err(TransportError::NotFound(path.to_string())),
        }
    }
}
