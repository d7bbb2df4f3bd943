//! Response envelope produced by one request execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The normalized result of one GraphQL HTTP request.
///
/// Immutable once constructed; each envelope belongs to exactly one
/// test execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Raw HTTP status code.
    pub status: u16,
    /// Response body parsed as JSON.
    pub body: Value,
    /// Timestamp taken immediately before the transport send.
    pub started_at: DateTime<Utc>,
    /// Timestamp taken after the body was received.
    pub finished_at: DateTime<Utc>,
}

impl ResponseEnvelope {
    /// Creates an envelope from raw response data and its timing window.
    #[must_use]
    pub const fn new(
        status: u16,
        body: Value,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            status,
            body,
            started_at,
            finished_at,
        }
    }

    /// Returns the top-level `data` value, if present.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// Returns the top-level `errors` value, if present.
    #[must_use]
    pub fn errors(&self) -> Option<&Value> {
        self.body.get("errors")
    }

    /// Returns true if the body carries request-level errors.
    ///
    /// An explicit `"errors": null` or an empty array does not count.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        match self.errors() {
            None | Some(Value::Null) => false,
            Some(Value::Array(errors)) => !errors.is_empty(),
            Some(_) => true,
        }
    }

    /// Wall-clock duration of the request, in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
