//! Harness error types

use gqlprobe_domain::{DescriptorError, ValidationError};
use thiserror::Error;

use crate::ports::{CredentialError, FixtureError, TransportError};

/// Failures local to one test unit (or to building the harness itself).
///
/// None of these cause sibling test units to be skipped.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Network or body-decoding failure during send/receive.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Expected/suite fixture could not be loaded.
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// The response failed the success check or the expected comparison.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A test case descriptor is structurally invalid.
    #[error("invalid test descriptor: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Credential acquisition failed.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// The endpoint is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialize(String),
}

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
