//! Transport port: JSON request/response to a remote scoring endpoint.
//!
//! This trait abstracts the HTTP client from the remote scorer.

use serde_json::Value;

/// Errors from a single request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Non-2xx status with the server's error detail, if it sent one
    #[error("HTTP status {0}: {1}")]
    Status(u16, String),

    #[error("Unreadable response body: {0}")]
    Body(String),
}

/// Trait for posting a JSON body and reading a JSON reply.
pub trait ScoringTransport: Send + Sync {
    /// POST `body` to `url` and return the decoded JSON response.
    ///
    /// # Errors
    /// Returns `TransportError` on connection failure, non-2xx status, or a
    /// body that is not JSON.
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError>;
}
