//! GraphQL transport port

use async_trait::async_trait;
use gqlprobe_domain::HeaderSet;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while sending a request or receiving its response.
///
/// All of these are hard failures of the calling test; the harness never
/// retries or suppresses them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport-level send timed out.
    #[error("request to {endpoint} timed out: {message}")]
    Timeout {
        /// Endpoint the request targeted.
        endpoint: String,
        /// Underlying transport message.
        message: String,
    },

    /// The connection could not be established.
    #[error("connection to {endpoint} failed: {message}")]
    Connection {
        /// Endpoint the request targeted.
        endpoint: String,
        /// Underlying transport message.
        message: String,
    },

    /// The response body could not be parsed as JSON.
    #[error("response body is not valid JSON: {message}")]
    InvalidBody {
        /// Parse failure plus a preview of the offending body.
        message: String,
    },

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// The raw outcome of one HTTP exchange, before envelope assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body parsed as JSON.
    pub body: Value,
}

/// Port for sending one GraphQL HTTP request.
///
/// Implementations are stateless across calls; concurrent invocations
/// must not interfere with each other.
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    /// Sends `body` to `endpoint` with the given method and headers and
    /// returns the status plus the JSON-parsed response body.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on network failure, timeout, or a
    /// non-JSON response body.
    async fn send(
        &self,
        endpoint: &str,
        method: &str,
        headers: &HeaderSet,
        body: &Value,
    ) -> Result<RawResponse, TransportError>;
}
