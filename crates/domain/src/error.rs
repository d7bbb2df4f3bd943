//! Domain error types

use serde_json::Value;
use thiserror::Error;

/// Validation failures raised while checking a response against the
/// harness success criteria or an expected fixture.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The HTTP status was not exactly 200.
    #[error("expected HTTP status 200, got {status}")]
    ProtocolFailure {
        /// The status code the endpoint returned.
        status: u16,
    },

    /// The response carried request-level `errors` under the strict
    /// success mode.
    #[error("response carries request-level errors: {errors}")]
    ResponseError {
        /// The `errors` payload, attached for diagnostics.
        errors: Value,
    },

    /// The payload was deep-unequal to the resolved expected value.
    #[error("payload mismatch at `{path}`: expected {expected}, got {actual}")]
    AssertionMismatch {
        /// JSON-pointer path of the first divergence.
        path: String,
        /// The full resolved expected value.
        expected: Value,
        /// The full actual value the comparison ran against.
        actual: Value,
    },
}

/// Structural problems in a test case descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// Neither `label` nor `name` was supplied.
    #[error("descriptor {index} has neither `label` nor `name`")]
    MissingLabel {
        /// Zero-based position of the descriptor in its suite.
        index: usize,
    },
}
