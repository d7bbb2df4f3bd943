//! Filesystem fixture store.

use std::path::Path;

use async_trait::async_trait;
use gqlprobe_application::ports::{FixtureError, FixtureStore};
use tokio::fs;

/// Fixture store reading from the real filesystem via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFixtureStore;

impl TokioFixtureStore {
    /// Creates a new `TokioFixtureStore`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FixtureStore for TokioFixtureStore {
    async fn read_to_string(&self, path: &Path) -> Result<String, FixtureError> {
        fs::read_to_string(path).await.map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                FixtureError::NotFound(path.to_path_buf())
            } else {
                FixtureError::Io {
                    path: path.to_path_buf(),
                    message: error.to_string(),
                }
            }
        })
    }

    async fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
    }
}
