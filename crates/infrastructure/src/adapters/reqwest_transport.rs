//! GraphQL transport implementation using reqwest.
//!
//! This adapter implements the `GraphQLTransport` port. It serializes
//! the request body, sends it with the caller's header set untouched,
//! and parses the response body as JSON.

use async_trait::async_trait;
use gqlprobe_application::ports::{GraphQLTransport, RawResponse, TransportError};
use gqlprobe_domain::HeaderSet;
use reqwest::{Client, Method};
use serde_json::Value;

/// GraphQL transport backed by `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default client settings and a
    /// `gqlprobe/<version>` user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("gqlprobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| TransportError::Other(error.to_string()))?;
        Ok(Self { client })
    }

    /// Creates a transport over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Maps reqwest errors to transport error kinds.
    fn map_error(error: &reqwest::Error, endpoint: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            };
        }
        if error.is_connect() {
            return TransportError::Connection {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            };
        }
        TransportError::Other(error.to_string())
    }

    /// Truncates a body for inclusion in an error message.
    fn preview(body: &[u8]) -> String {
        const LIMIT: usize = 200;
        let text = String::from_utf8_lossy(body);
        if text.chars().count() > LIMIT {
            let head: String = text.chars().take(LIMIT).collect();
            format!("{head}...")
        } else {
            text.into_owned()
        }
    }
}

#[async_trait]
impl GraphQLTransport for ReqwestTransport {
    async fn send(
        &self,
        endpoint: &str,
        method: &str,
        headers: &HeaderSet,
        body: &Value,
    ) -> Result<RawResponse, TransportError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| TransportError::Other(format!("unsupported HTTP method: {method}")))?;
        let payload = serde_json::to_vec(body)
            .map_err(|error| TransportError::Other(error.to_string()))?;

        let mut builder = self.client.request(method, endpoint);
        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }

        let response = builder
            .body(payload)
            .send()
            .await
            .map_err(|error| Self::map_error(&error, endpoint))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| Self::map_error(&error, endpoint))?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|error| {
            TransportError::InvalidBody {
                message: format!("{error}; body: {}", Self::preview(&bytes)),
            }
        })?;

        Ok(RawResponse { status, body })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_preview_truncates_long_bodies() {
        let long = "x".repeat(500);
        let preview = ReqwestTransport::preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert!(preview.len() < long.len());
    }

    #[test]
    fn test_preview_keeps_short_bodies() {
        assert_eq!(ReqwestTransport::preview(b"<html>"), "<html>");
    }
}
