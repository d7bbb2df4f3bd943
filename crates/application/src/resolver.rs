//! Fixture resolution.
//!
//! Turns an `expected`/`tests` specification (an inline JSON value, a
//! file path, or a directory keyed by test label) into concrete data.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gqlprobe_domain::{ExpectedSpec, TestCaseDescriptor, fixture_file_name};
use serde_json::Value;

use crate::ports::{FixtureError, FixtureStore};

/// Resolves fixture specifications through a [`FixtureStore`].
#[derive(Clone)]
pub struct FixtureResolver {
    store: Arc<dyn FixtureStore>,
}

impl FixtureResolver {
    /// Creates a resolver over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn FixtureStore>) -> Self {
        Self { store }
    }

    /// Classifies a raw `expected` value into its [`ExpectedSpec`]
    /// variant.
    ///
    /// Non-string values are inline; a string naming a directory is a
    /// directory fixture, any other string is treated as a file path
    /// (missing files surface as [`FixtureError::NotFound`] at
    /// resolution time).
    pub async fn classify(&self, value: Value) -> ExpectedSpec {
        match value {
            Value::String(path) => {
                let path = PathBuf::from(path);
                if self.store.is_dir(&path).await {
                    ExpectedSpec::DirectoryPath(path)
                } else {
                    ExpectedSpec::FilePath(path)
                }
            }
            inline => ExpectedSpec::Inline(inline),
        }
    }

    /// Resolves a spec into concrete JSON data.
    ///
    /// Inline values are returned unchanged. A file is loaded directly,
    /// ignoring `label`. A directory requires `label` and loads
    /// `<dir>/<sanitized-label>.json`.
    ///
    /// # Errors
    ///
    /// [`FixtureError::MissingLabel`] for a directory spec without a
    /// label; [`FixtureError::NotFound`]/[`FixtureError::Parse`] from
    /// the underlying load.
    pub async fn resolve(
        &self,
        spec: &ExpectedSpec,
        label: Option<&str>,
    ) -> Result<Value, FixtureError> {
        match spec {
            ExpectedSpec::Inline(value) => Ok(value.clone()),
            ExpectedSpec::FilePath(path) => self.load_json(path).await,
            ExpectedSpec::DirectoryPath(dir) => {
                let label =
                    label.ok_or_else(|| FixtureError::MissingLabel(dir.clone()))?;
                self.load_json(&dir.join(fixture_file_name(label))).await
            }
        }
    }

    /// Loads and parses one JSON fixture file.
    ///
    /// # Errors
    ///
    /// [`FixtureError::NotFound`]/[`FixtureError::Io`] from the read,
    /// [`FixtureError::Parse`] for invalid JSON.
    pub async fn load_json(&self, path: &Path) -> Result<Value, FixtureError> {
        let text = self.store.read_to_string(path).await?;
        serde_json::from_str(&text).map_err(|error| FixtureError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })
    }

    /// Loads a suite source file: a JSON array of test case
    /// descriptors.
    ///
    /// # Errors
    ///
    /// [`FixtureError::NotFound`]/[`FixtureError::Io`] from the read,
    /// [`FixtureError::Parse`] when the contents are not a descriptor
    /// array.
    pub async fn load_descriptors(
        &self,
        path: &Path,
    ) -> Result<Vec<TestCaseDescriptor>, FixtureError> {
        let value = self.load_json(path).await?;
        serde_json::from_value(value).map_err(|error| FixtureError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })
    }
}

impl std::fmt::Debug for FixtureResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    /// In-memory store: maps paths to file contents; `dirs` lists
    /// directory paths.
    #[derive(Default)]
    struct MemoryStore {
        files: HashMap<PathBuf, String>,
        dirs: Vec<PathBuf>,
    }

    impl MemoryStore {
        fn with_file(mut self, path: &str, contents: &str) -> Self {
            self.files.insert(PathBuf::from(path), contents.to_string());
            self
        }

        fn with_dir(mut self, path: &str) -> Self {
            self.dirs.push(PathBuf::from(path));
            self
        }
    }

    #[async_trait]
    impl FixtureStore for MemoryStore {
        async fn read_to_string(&self, path: &Path) -> Result<String, FixtureError> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| FixtureError::NotFound(path.to_path_buf()))
        }

        async fn is_dir(&self, path: &Path) -> bool {
            self.dirs.iter().any(|dir| dir == path)
        }
    }

    fn resolver(store: MemoryStore) -> FixtureResolver {
        FixtureResolver::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_inline_values_resolve_to_themselves() {
        let resolver = resolver(MemoryStore::default());
        let value = json!({"hero": {"name": "R2-D2"}});
        let spec = resolver.classify(value.clone()).await;
        assert_eq!(spec, ExpectedSpec::Inline(value.clone()));
        assert_eq!(resolver.resolve(&spec, Some("any")).await.expect("inline"), value);
        assert_eq!(resolver.resolve(&spec, None).await.expect("inline"), value);
    }

    #[tokio::test]
    async fn test_file_path_loads_and_ignores_label() {
        let resolver = resolver(
            MemoryStore::default().with_file("exp/human.json", r#"{"human":{"name":"Luke Skywalker"}}"#),
        );
        let spec = resolver.classify(json!("exp/human.json")).await;
        assert_eq!(spec, ExpectedSpec::FilePath(PathBuf::from("exp/human.json")));
        let resolved = resolver.resolve(&spec, Some("unrelated")).await.expect("loads");
        assert_eq!(resolved, json!({"human": {"name": "Luke Skywalker"}}));
    }

    #[tokio::test]
    async fn test_directory_resolution_equals_direct_file_load() {
        let store = MemoryStore::default()
            .with_dir("exp")
            .with_file("exp/droid-2000.json", r#"{"droid":{"name":"C-3PO"}}"#);
        let resolver = resolver(store);

        let dir_spec = resolver.classify(json!("exp")).await;
        assert_eq!(dir_spec, ExpectedSpec::DirectoryPath(PathBuf::from("exp")));
        let via_dir = resolver
            .resolve(&dir_spec, Some("droid-2000"))
            .await
            .expect("resolves");

        let file_spec = resolver.classify(json!("exp/droid-2000.json")).await;
        let via_file = resolver.resolve(&file_spec, Some("droid-2000")).await.expect("resolves");

        assert_eq!(via_dir, via_file);
    }

    #[tokio::test]
    async fn test_directory_without_label_fails() {
        let resolver = resolver(MemoryStore::default().with_dir("exp"));
        let spec = resolver.classify(json!("exp")).await;
        let error = resolver.resolve(&spec, None).await.expect_err("needs label");
        assert!(matches!(error, FixtureError::MissingLabel(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found_with_path() {
        let resolver = resolver(MemoryStore::default());
        let spec = resolver.classify(json!("exp/absent.json")).await;
        let error = resolver.resolve(&spec, None).await.expect_err("missing");
        assert!(error.to_string().contains("exp/absent.json"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_parse_error() {
        let resolver = resolver(MemoryStore::default().with_file("exp/bad.json", "{nope"));
        let error = resolver
            .load_json(Path::new("exp/bad.json"))
            .await
            .expect_err("invalid");
        assert!(matches!(error, FixtureError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_load_descriptors_rejects_non_arrays() {
        let resolver = resolver(MemoryStore::default().with_file("tests.json", r#"{"label":"x"}"#));
        let error = resolver
            .load_descriptors(Path::new("tests.json"))
            .await
            .expect_err("not an array");
        assert!(matches!(error, FixtureError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_load_descriptors() {
        let resolver = resolver(MemoryStore::default().with_file(
            "tests.json",
            r#"[{"label": "typename", "query": "{__typename}"}]"#,
        ));
        let descriptors = resolver
            .load_descriptors(Path::new("tests.json"))
            .await
            .expect("loads");
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].effective_label(0), Ok("typename"));
    }
}
