//! Failure diagnostics reporter.

use gqlprobe_application::TestReport;
use gqlprobe_application::ports::TestObserver;

/// Observer that logs failure diagnostics through `tracing`.
///
/// Passed tests are ignored. For a failed test it emits the execution
/// time window (when the test performed a request) and the raw HTTP
/// status plus the full raw JSON body (when a response was captured).
/// It never alters the already-determined outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    /// Creates a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TestObserver for TracingReporter {
    fn on_test_complete(&self, report: &TestReport) {
        if report.passed() {
            return;
        }
        let ctx = &report.context;

        if let Some(started_at) = ctx.started_at {
            match ctx.finished_at {
                Some(finished_at) => tracing::error!(
                    test = %ctx.label,
                    start = %started_at.to_rfc3339(),
                    end = %finished_at.to_rfc3339(),
                    "request window",
                ),
                None => tracing::error!(
                    test = %ctx.label,
                    start = %started_at.to_rfc3339(),
                    "request window (no response)",
                ),
            }
        }

        if let Some(envelope) = &ctx.envelope {
            tracing::error!(
                test = %ctx.label,
                status = envelope.status,
                body = %envelope.body,
                "response",
            );
        }

        if let Some(message) = report.failure_message() {
            tracing::error!(test = %ctx.label, endpoint = %ctx.endpoint, %message, "test failed");
        }
    }
}
