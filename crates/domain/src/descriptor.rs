//! Declarative test case descriptors for table-driven suites.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DescriptorError;
use crate::request::GraphQLRequest;

/// One test case of a table-driven suite, prior to expansion.
///
/// The request can be given as a whole object in `request` or through
/// the flattened individual fields; `request` takes precedence
/// wholesale. `label` and `name` are aliases for the test name, `label`
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseDescriptor {
    /// Test name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Alternative to `label` for the test name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The whole request object; overrides the flattened fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<GraphQLRequest>,
    /// Flattened persisted-document identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Flattened query text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Flattened operation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// Flattened variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
    /// Expected value: inline JSON, a fixture file path, or a fixture
    /// directory path; classified when the suite is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
}

impl TestCaseDescriptor {
    /// Creates a descriptor with the given label and query text.
    #[must_use]
    pub fn query(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Sets the expected value.
    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Sets a single variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Resolves the test name, preferring `label` over `name`.
    ///
    /// # Errors
    ///
    /// [`DescriptorError::MissingLabel`] when neither is supplied;
    /// `index` is the descriptor's position within its suite.
    pub fn effective_label(&self, index: usize) -> Result<&str, DescriptorError> {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .ok_or(DescriptorError::MissingLabel { index })
    }

    /// Builds the request this case sends.
    ///
    /// Prefers `request` verbatim when present; otherwise assembles it
    /// field-by-field from the flattened fields, including only those
    /// that are present.
    #[must_use]
    pub fn effective_request(&self) -> GraphQLRequest {
        self.request.clone().unwrap_or_else(|| GraphQLRequest {
            query: self.query.clone(),
            document_id: self.document_id.clone(),
            operation_name: self.operation_name.clone(),
            variables: self.variables.clone(),
        })
    }
}
