//! HTTP header set construction for GraphQL requests.
//!
//! Every request carries a [`HeaderSet`]: an ordered name/value mapping
//! built fluently, starting from JSON content negotiation defaults and
//! any overrides supplied through the environment.

use serde_json::Value;

/// Environment variable holding a JSON object of header overrides.
///
/// When set, each entry is merged into every [`HeaderSet::new`] result
/// after the defaults, so overrides win. The variable is re-read on each
/// construction; callers that share a header factory across tests pick
/// up changes per call.
pub const HEADER_OVERRIDES_ENV: &str = "GQLPROBE_HEADERS";

/// Default `Accept` value: prefer the structured GraphQL success content
/// type, fall back to plain JSON with a lower quality weight.
pub const DEFAULT_ACCEPT: &str = "application/graphql-response+json, application/json;q=0.9";

/// An ordered set of HTTP headers with case-insensitively unique names.
///
/// Setting a name that is already present replaces the value in place
/// (last write wins) and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    items: Vec<(String, String)>,
}

impl HeaderSet {
    /// Creates a header set with the default negotiation headers and any
    /// environment-supplied overrides merged in.
    ///
    /// Defaults: `Content-Type: application/json` and [`DEFAULT_ACCEPT`].
    /// A malformed override value is reported and ignored; construction
    /// never fails.
    #[must_use]
    pub fn new() -> Self {
        let mut headers = Self::bare()
            .with_header("Content-Type", "application/json")
            .with_header("Accept", DEFAULT_ACCEPT);
        if let Ok(raw) = std::env::var(HEADER_OVERRIDES_ENV) {
            headers.merge_overrides(&raw);
        }
        headers
    }

    /// Creates an empty header set with no defaults and no environment
    /// merge.
    #[must_use]
    pub const fn bare() -> Self {
        Self { items: Vec::new() }
    }

    /// Sets a header, replacing any existing value for the same name
    /// (case-insensitive) while preserving its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self
            .items
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            slot.1 = value;
        } else {
            self.items.push((name, value));
        }
    }

    /// Sets a header, returning the set for chaining.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `Authorization: apikey <key>`.
    #[must_use]
    pub fn with_api_key(self, key: impl AsRef<str>) -> Self {
        self.with_header("Authorization", format!("apikey {}", key.as_ref()))
    }

    /// Sets `Authorization: Bearer <token>`.
    #[must_use]
    pub fn with_token(self, token: impl AsRef<str>) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Returns the value for a header name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set holds no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merges a JSON object of overrides into the set; overrides win.
    ///
    /// Non-object documents and non-string entry values are reported via
    /// `tracing` and skipped.
    pub fn merge_overrides(&mut self, raw: &str) {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(entries)) => {
                for (name, value) in entries {
                    match value {
                        Value::String(value) => self.set(name, value),
                        other => {
                            tracing::warn!(
                                header = %name,
                                value = %other,
                                "ignoring non-string header override",
                            );
                        }
                    }
                }
            }
            Ok(other) => {
                tracing::warn!(value = %other, "header overrides must be a JSON object");
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring malformed header overrides");
            }
        }
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = (&'a str, &'a str);
    type IntoIter = std::vec::IntoIter<(&'a str, &'a str)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter().collect::<Vec<_>>().into_iter()
    }
}
