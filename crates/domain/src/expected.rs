//! Expected-value fixture specification.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Where an expected value comes from.
///
/// Suite authors write either an inline JSON value or a path string; a
/// path is classified as a file or a directory when the fixture store
/// is consulted at test-setup time. Directory fixtures are keyed by the
/// owning test's label, so their resolution is deferred until that
/// label is known.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedSpec {
    /// A literal JSON value, returned unchanged by resolution.
    Inline(Value),
    /// A JSON file holding the expected value.
    FilePath(PathBuf),
    /// A directory holding one `<label>.json` file per test.
    DirectoryPath(PathBuf),
}

impl ExpectedSpec {
    /// Returns the path for the file- and directory-backed variants.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Inline(_) => None,
            Self::FilePath(path) | Self::DirectoryPath(path) => Some(path),
        }
    }
}

/// Builds the fixture file name for a test label.
///
/// Path separators, NUL and other control characters are replaced with
/// `-` so a label can never escape its fixture directory.
#[must_use]
pub fn fixture_file_name(label: &str) -> String {
    let sanitized: String = label
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '-'
            } else {
                c
            }
        })
        .collect();
    format!("{sanitized}.json")
}
