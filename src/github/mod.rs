//! GitHub REST transport
//!
//! The [`Transport`] trait is the only seam between milestone logic and the
//! network. [`HttpTransport`] is the production implementation on top of
//! reqwest; tests substitute an in-memory recorder.

mod http;
#[cfg(test)]
pub(crate) mod mock;
mod transport;

pub use http::{rest_base_url, HttpTransport, API_VERSION, DEFAULT_API_URL, REQUEST_TIMEOUT};
pub use transport::{Transport, TransportError, TransportResult};
