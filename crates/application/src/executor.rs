//! Request execution.
//!
//! Sends one GraphQL request through the transport port, captures the
//! timing window, and produces the normalized [`ResponseEnvelope`].

use std::fmt;
use std::sync::Arc;

use gqlprobe_domain::{GraphQLRequest, HeaderSet, ResponseEnvelope};

use crate::context::TestContext;
use crate::error::{HarnessError, HarnessResult};
use crate::ports::{Clock, GraphQLTransport};

/// Default HTTP method for GraphQL requests.
pub const DEFAULT_METHOD: &str = "POST";

/// Headers for a request: a shared set or a per-call factory.
///
/// A shared set must be treated as effectively immutable for the suite;
/// callers needing per-call freshness (environment re-reads, avoiding
/// header accumulation across tests) supply a factory instead.
pub enum HeaderSource {
    /// One set, cloned into every request.
    Shared(HeaderSet),
    /// A zero-argument producer invoked once per request.
    Factory(Box<dyn Fn() -> HeaderSet + Send + Sync>),
}

impl HeaderSource {
    /// Wraps a factory closure.
    #[must_use]
    pub fn factory(produce: impl Fn() -> HeaderSet + Send + Sync + 'static) -> Self {
        Self::Factory(Box::new(produce))
    }

    /// Produces the headers for one request.
    #[must_use]
    pub fn materialize(&self) -> HeaderSet {
        match self {
            Self::Shared(headers) => headers.clone(),
            Self::Factory(produce) => produce(),
        }
    }
}

impl From<HeaderSet> for HeaderSource {
    fn from(headers: HeaderSet) -> Self {
        Self::Shared(headers)
    }
}

impl fmt::Debug for HeaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared(headers) => f.debug_tuple("Shared").field(headers).finish(),
            Self::Factory(_) => f.debug_tuple("Factory").field(&"<closure>").finish(),
        }
    }
}

/// Executes single GraphQL requests against an endpoint.
///
/// Stateless across calls; holds only its port handles.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn GraphQLTransport>,
    clock: Arc<dyn Clock>,
}

impl RequestExecutor {
    /// Creates an executor over the given ports.
    #[must_use]
    pub fn new(transport: Arc<dyn GraphQLTransport>, clock: Arc<dyn Clock>) -> Self {
        Self { transport, clock }
    }

    /// Sends one request and returns the normalized envelope.
    ///
    /// `started_at` is recorded immediately before the transport send,
    /// and the full envelope is stored on `ctx` before this returns, so
    /// the post-test hook can report it even when validation later
    /// fails.
    ///
    /// # Errors
    ///
    /// Propagates transport failures (including non-JSON bodies) as
    /// hard failures; no retries, no suppression.
    pub async fn execute(
        &self,
        endpoint: &str,
        request: &GraphQLRequest,
        method: &str,
        headers: &HeaderSource,
        ctx: &mut TestContext,
    ) -> HarnessResult<ResponseEnvelope> {
        let headers = headers.materialize();
        let body = serde_json::to_value(request)
            .map_err(|error| HarnessError::Serialize(error.to_string()))?;

        let started_at = self.clock.now();
        ctx.started_at = Some(started_at);

        let raw = self.transport.send(endpoint, method, &headers, &body).await;
        let finished_at = self.clock.now();
        ctx.finished_at = Some(finished_at);
        let raw = raw?;

        let envelope = ResponseEnvelope::new(raw.status, raw.body, started_at, finished_at);
        ctx.envelope = Some(envelope.clone());
        Ok(envelope)
    }
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}
