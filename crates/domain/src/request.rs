//! GraphQL request specification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GraphQL-over-HTTP request body.
///
/// Exactly one of `query` and `document_id` is expected to drive
/// execution; both may be carried, and the serving endpoint decides
/// which wins. Absent fields are omitted from the wire body entirely.
///
/// The `query` text may be a single operation or a whole pre-loaded
/// operations document; in the latter case `operation_name` selects the
/// operation to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    /// The query document text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Identifier of a persisted query document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Operation to execute when the document holds more than one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// Variable values for the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphQLRequest {
    /// Creates a request from query document text.
    #[must_use]
    pub fn query(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Self::default()
        }
    }

    /// Creates a request referencing a persisted document.
    #[must_use]
    pub fn document_id(id: impl Into<String>) -> Self {
        Self {
            document_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Replaces the variables map.
    #[must_use]
    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Sets a single variable, creating the map if needed.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns true if neither `query` nor `document_id` is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.query.is_none() && self.document_id.is_none()
    }
}
