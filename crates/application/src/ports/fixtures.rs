//! Fixture store port

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while loading expected-value or suite-source fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture path does not exist.
    #[error("fixture not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The fixture exists but could not be read.
    #[error("failed to read fixture {}: {message}", .path.display())]
    Io {
        /// Path of the unreadable fixture.
        path: PathBuf,
        /// Underlying I/O message.
        message: String,
    },

    /// The fixture contents are not valid JSON (or not the expected
    /// JSON shape).
    #[error("fixture {} is not valid JSON: {message}", .path.display())]
    Parse {
        /// Path of the malformed fixture.
        path: PathBuf,
        /// Underlying parse message.
        message: String,
    },

    /// A directory fixture was referenced without a test label.
    #[error("directory fixture {} requires a test label", .0.display())]
    MissingLabel(PathBuf),
}

/// Port for reading fixtures from storage.
#[async_trait]
pub trait FixtureStore: Send + Sync {
    /// Reads a fixture file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`FixtureError::NotFound`] when the path does not exist,
    /// [`FixtureError::Io`] for any other read failure.
    async fn read_to_string(&self, path: &Path) -> Result<String, FixtureError>;

    /// Returns true if the path names a directory.
    async fn is_dir(&self, path: &Path) -> bool;
}
