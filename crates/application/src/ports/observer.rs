//! Test observer port

use crate::context::TestReport;

/// Port invoked unconditionally after each test unit completes.
///
/// Implementations are strictly observational: the signature is
/// infallible, and nothing an observer does can alter the
/// already-determined pass/fail outcome.
pub trait TestObserver: Send + Sync {
    /// Called once per completed test unit, pass or fail.
    fn on_test_complete(&self, report: &TestReport);
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl TestObserver for NullObserver {
    fn on_test_complete(&self, _report: &TestReport) {}
}
