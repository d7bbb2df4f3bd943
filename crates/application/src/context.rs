//! Per-test execution context and reports.
//!
//! The context is an explicit structure handed to both the execution
//! step and the post-test observer hook.

use chrono::{DateTime, Utc};
use gqlprobe_domain::ResponseEnvelope;
use serde::Serialize;

/// Diagnostic state captured while one test unit runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestContext {
    /// The test's label.
    pub label: String,
    /// Endpoint the test targeted.
    pub endpoint: String,
    /// Set immediately before the transport send.
    pub started_at: Option<DateTime<Utc>>,
    /// Set once the response was received.
    pub finished_at: Option<DateTime<Utc>>,
    /// The captured response, when the request got that far.
    pub envelope: Option<ResponseEnvelope>,
}

impl TestContext {
    /// Creates a context for a test unit.
    #[must_use]
    pub fn new(label: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            endpoint: endpoint.into(),
            started_at: None,
            finished_at: None,
            envelope: None,
        }
    }

    /// Returns true if the test performed a request.
    #[must_use]
    pub const fn requested(&self) -> bool {
        self.started_at.is_some()
    }
}

/// Final outcome of one test unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TestOutcome {
    /// The unit passed.
    Passed,
    /// The unit failed; `message` carries the failure detail.
    Failed {
        /// Human-readable failure message.
        message: String,
    },
    /// The unit exceeded its configured timeout.
    TimedOut {
        /// The configured bound, in milliseconds.
        timeout_ms: u64,
    },
}

impl TestOutcome {
    /// Returns true for [`TestOutcome::Passed`].
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// The report for one completed test unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    /// Outcome of the unit.
    pub outcome: TestOutcome,
    /// Diagnostic context captured while the unit ran.
    pub context: TestContext,
}

impl TestReport {
    /// Returns the test's label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.context.label
    }

    /// Returns true if the unit passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_passed()
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        match &self.outcome {
            TestOutcome::Passed => None,
            TestOutcome::Failed { message } => Some(message.clone()),
            TestOutcome::TimedOut { timeout_ms } => {
                Some(format!("timed out after {timeout_ms} ms"))
            }
        }
    }
}
