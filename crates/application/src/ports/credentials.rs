//! Credential provider port

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while obtaining credentials from an external provider.
///
/// These are hard failures; the harness never falls back to
/// unauthenticated requests silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No credential provider was configured on the harness.
    #[error("no credential provider configured")]
    NotConfigured,

    /// The external credential command could not be started.
    #[error("credential command failed to start: {0}")]
    Spawn(String),

    /// The external credential command ran but failed.
    #[error("credential command exited with status {status}: {stderr}")]
    Failed {
        /// Process exit code (`-1` when terminated by a signal).
        status: i32,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The command succeeded but produced unusable output.
    #[error("credential command produced invalid output: {0}")]
    InvalidOutput(String),
}

/// Port for acquiring API credentials at two privilege levels.
///
/// Implementations are expected to fetch lazily on first use and cache
/// the result for the life of the provider.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the admin-level secret.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialError`] when acquisition fails.
    async fn admin_key(&self) -> Result<String, CredentialError>;

    /// Returns the regular-level secret.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialError`] when acquisition fails.
    async fn api_key(&self) -> Result<String, CredentialError>;
}
