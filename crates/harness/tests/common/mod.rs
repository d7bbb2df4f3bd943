//! Shared test doubles for the harness integration tests.
#![allow(dead_code)] // not every test binary touches every helper

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use gqlprobe::ports::{GraphQLTransport, RawResponse, TransportError};
use gqlprobe::{GraphQLRequest, HeaderSet};
use serde_json::{Value, json};

/// One request as the scripted transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: String,
    pub method: String,
    pub authorization: Option<String>,
    pub query: String,
}

/// In-memory transport scripted by query text.
///
/// Unknown queries are answered with a request-level error payload, so
/// tests exercising failure paths need no extra setup.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, (u16, Value)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a 200 response for a query.
    pub fn respond(self, query: &str, body: Value) -> Self {
        self.respond_with_status(query, 200, body)
    }

    /// Scripts a response with an explicit status.
    pub fn respond_with_status(mut self, query: &str, status: u16, body: Value) -> Self {
        self.responses.insert(query.to_string(), (status, body));
        self
    }

    /// Returns every call recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl GraphQLTransport for ScriptedTransport {
    async fn send(
        &self,
        endpoint: &str,
        method: &str,
        headers: &HeaderSet,
        body: &Value,
    ) -> Result<RawResponse, TransportError> {
        let request: GraphQLRequest = serde_json::from_value(body.clone())
            .map_err(|error| TransportError::Other(error.to_string()))?;
        let query = request.query.unwrap_or_default();

        self.calls.lock().expect("calls lock").push(RecordedCall {
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            authorization: headers.get("Authorization").map(str::to_string),
            query: query.clone(),
        });

        let (status, body) = self.responses.get(&query).cloned().unwrap_or_else(|| {
            (
                200,
                json!({"errors": [{"message": format!("unknown query: {query}")}]}),
            )
        });
        Ok(RawResponse { status, body })
    }
}
