//! Table-driven suite expansion and execution.
//!
//! Turns a declarative list (or file) of test case descriptors into
//! individually executed, independently failing test units.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use gqlprobe_domain::{CompareMode, SuccessMode, TestCaseDescriptor, check_success,
    compare_to_expected};
use serde::Serialize;
use uuid::Uuid;

use crate::context::{TestContext, TestOutcome, TestReport};
use crate::error::HarnessResult;
use crate::executor::{DEFAULT_METHOD, HeaderSource, RequestExecutor};
use crate::ports::{FixtureError, TestObserver};
use crate::resolver::FixtureResolver;

/// Per-test-run timeout applied when none is configured, matching the
/// execution limit enforced by the serving platform.
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Configuration for one suite run.
#[derive(Debug)]
pub struct SuiteSpec {
    /// Suite name, used as the report label.
    pub label: String,
    /// Endpoint every test unit targets.
    pub endpoint: String,
    /// Headers shared across the suite (or a per-call factory).
    pub header_source: HeaderSource,
    /// Success strictness applied to every unit.
    pub success_mode: SuccessMode,
    /// Expected-value interpretation applied to every unit.
    pub compare_mode: CompareMode,
    /// Per-unit timeout.
    pub timeout: Duration,
}

impl SuiteSpec {
    /// Creates a spec with default modes and timeout.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        endpoint: impl Into<String>,
        header_source: impl Into<HeaderSource>,
    ) -> Self {
        Self {
            label: label.into(),
            endpoint: endpoint.into(),
            header_source: header_source.into(),
            success_mode: SuccessMode::default(),
            compare_mode: CompareMode::default(),
            timeout: DEFAULT_TEST_TIMEOUT,
        }
    }

    /// Sets the success strictness.
    #[must_use]
    pub const fn with_success_mode(mut self, mode: SuccessMode) -> Self {
        self.success_mode = mode;
        self
    }

    /// Sets the expected-value interpretation.
    #[must_use]
    pub const fn with_compare_mode(mut self, mode: CompareMode) -> Self {
        self.compare_mode = mode;
        self
    }

    /// Sets the per-unit timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Where a suite's test cases come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SuiteSource {
    /// Descriptors held in memory.
    Inline(Vec<TestCaseDescriptor>),
    /// A JSON file holding an array of descriptors.
    File(PathBuf),
}

impl From<Vec<TestCaseDescriptor>> for SuiteSource {
    fn from(descriptors: Vec<TestCaseDescriptor>) -> Self {
        Self::Inline(descriptors)
    }
}

impl From<PathBuf> for SuiteSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

/// The outcome of one suite run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    /// Unique identifier of this run.
    pub id: Uuid,
    /// Suite label.
    pub label: String,
    /// One report per executed test unit, in declaration order.
    pub tests: Vec<TestReport>,
}

impl SuiteReport {
    fn new(label: impl Into<String>, tests: Vec<TestReport>) -> Self {
        Self {
            id: Uuid::now_v7(),
            label: label.into(),
            tests,
        }
    }

    /// Number of passed units.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.tests.iter().filter(|test| test.passed()).count()
    }

    /// Number of failed units.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.tests.len() - self.passed()
    }

    /// Returns true when every unit passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Expands suite sources into test units and executes them.
#[derive(Clone)]
pub struct SuiteRunner {
    executor: RequestExecutor,
    resolver: FixtureResolver,
    observer: Arc<dyn TestObserver>,
}

impl SuiteRunner {
    /// Creates a runner over the given components.
    #[must_use]
    pub fn new(
        executor: RequestExecutor,
        resolver: FixtureResolver,
        observer: Arc<dyn TestObserver>,
    ) -> Self {
        Self {
            executor,
            resolver,
            observer,
        }
    }

    /// Runs a suite: resolves the source, executes one unit per
    /// descriptor sequentially in declaration order, and reports.
    ///
    /// A source resolution failure degrades to a report holding exactly
    /// one synthetic failing test named after the faulty source, so
    /// sibling suites keep running. Unit failures never skip or fail
    /// sibling units. The observer hook fires after every unit, pass or
    /// fail.
    pub async fn run(&self, spec: &SuiteSpec, source: SuiteSource) -> SuiteReport {
        let descriptors = match source {
            SuiteSource::Inline(descriptors) => descriptors,
            SuiteSource::File(path) => match self.resolver.load_descriptors(&path).await {
                Ok(descriptors) => descriptors,
                Err(error) => return self.source_failure(spec, &path, &error),
            },
        };

        let mut tests = Vec::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let report = self.run_unit(spec, index, descriptor).await;
            self.observer.on_test_complete(&report);
            tests.push(report);
        }
        SuiteReport::new(&spec.label, tests)
    }

    /// Runs one test unit under the suite's timeout.
    async fn run_unit(
        &self,
        spec: &SuiteSpec,
        index: usize,
        descriptor: TestCaseDescriptor,
    ) -> TestReport {
        let label = descriptor
            .effective_label(index)
            .map_or_else(|_| format!("case-{index}"), str::to_string);
        let mut ctx = TestContext::new(&label, &spec.endpoint);

        let unit = self.execute_unit(spec, index, &descriptor, &label, &mut ctx);
        let outcome = match tokio::time::timeout(spec.timeout, unit).await {
            Ok(Ok(())) => TestOutcome::Passed,
            Ok(Err(error)) => TestOutcome::Failed {
                message: error.to_string(),
            },
            Err(_) => TestOutcome::TimedOut {
                timeout_ms: u64::try_from(spec.timeout.as_millis()).unwrap_or(u64::MAX),
            },
        };
        TestReport {
            outcome,
            context: ctx,
        }
    }

    /// One unit: effective request → execute → success check →
    /// optional expected comparison.
    async fn execute_unit(
        &self,
        spec: &SuiteSpec,
        index: usize,
        descriptor: &TestCaseDescriptor,
        label: &str,
        ctx: &mut TestContext,
    ) -> HarnessResult<()> {
        descriptor.effective_label(index)?;
        let request = descriptor.effective_request();
        let envelope = self
            .executor
            .execute(&spec.endpoint, &request, DEFAULT_METHOD, &spec.header_source, ctx)
            .await?;
        check_success(&envelope, spec.success_mode)?;
        if let Some(expected) = descriptor.expected.clone() {
            let expected_spec = self.resolver.classify(expected).await;
            let resolved = self.resolver.resolve(&expected_spec, Some(label)).await?;
            compare_to_expected(&envelope.body, &resolved, spec.compare_mode)?;
        }
        Ok(())
    }

    /// Builds the single-synthetic-failure report for an unloadable
    /// suite source.
    fn source_failure(&self, spec: &SuiteSpec, path: &Path, error: &FixtureError) -> SuiteReport {
        let label = path.display().to_string();
        let report = TestReport {
            outcome: TestOutcome::Failed {
                message: error.to_string(),
            },
            context: TestContext::new(&label, &spec.endpoint),
        };
        self.observer.on_test_complete(&report);
        SuiteReport::new(&spec.label, vec![report])
    }
}

impl std::fmt::Debug for SuiteRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteRunner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Clock, FixtureStore, GraphQLTransport, RawResponse, TransportError};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use gqlprobe_domain::{GraphQLRequest, HeaderSet};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Transport scripted by query text; unknown queries get a
    /// request-level error payload.
    struct ScriptedTransport {
        responses: HashMap<String, Value>,
        delay: Option<Duration>,
    }

    impl ScriptedTransport {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                delay: None,
            }
        }

        fn respond(mut self, query: &str, body: Value) -> Self {
            self.responses.insert(query.to_string(), body);
            self
        }

        const fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl GraphQLTransport for ScriptedTransport {
        async fn send(
            &self,
            _endpoint: &str,
            _method: &str,
            _headers: &HeaderSet,
            body: &Value,
        ) -> Result<RawResponse, TransportError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let request: GraphQLRequest =
                serde_json::from_value(body.clone()).map_err(|e| TransportError::Other(e.to_string()))?;
            let query = request.query.unwrap_or_default();
            let body = self.responses.get(&query).cloned().unwrap_or_else(|| {
                json!({"errors": [{"message": format!("unknown query: {query}")}]})
            });
            Ok(RawResponse { status: 200, body })
        }
    }

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

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Observer recording every completed test label and outcome.
    #[derive(Default)]
    struct RecordingObserver {
        completed: Mutex<Vec<(String, bool)>>,
    }

    impl TestObserver for RecordingObserver {
        fn on_test_complete(&self, report: &TestReport) {
            self.completed
                .lock()
                .expect("lock")
                .push((report.label().to_string(), report.passed()));
        }
    }

    fn runner(transport: ScriptedTransport, store: MemoryStore) -> (SuiteRunner, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let runner = SuiteRunner::new(
            RequestExecutor::new(Arc::new(transport), Arc::new(FixedClock)),
            FixtureResolver::new(Arc::new(store)),
            Arc::clone(&observer) as Arc<dyn TestObserver>,
        );
        (runner, observer)
    }

    fn spec() -> SuiteSpec {
        SuiteSpec::new("starwars", "http://localhost/graphql", HeaderSet::bare())
    }

    #[tokio::test]
    async fn test_expands_one_unit_per_descriptor_in_order() {
        let transport = ScriptedTransport::new()
            .respond("{hero {name}}", json!({"data": {"hero": {"name": "R2-D2"}}}))
            .respond("{droid {name}}", json!({"data": {"droid": {"name": "C-3PO"}}}));
        let (runner, observer) = runner(transport, MemoryStore::default());

        let report = runner
            .run(
                &spec(),
                SuiteSource::Inline(vec![
                    TestCaseDescriptor::query("hero", "{hero {name}}")
                        .with_expected(json!({"hero": {"name": "R2-D2"}})),
                    TestCaseDescriptor::query("droid", "{droid {name}}")
                        .with_expected(json!({"droid": {"name": "C-3PO"}})),
                ]),
            )
            .await;

        assert_eq!(report.tests.len(), 2);
        assert!(report.all_passed());
        let completed = observer.completed.lock().expect("lock");
        assert_eq!(
            *completed,
            vec![("hero".to_string(), true), ("droid".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn test_unit_failures_do_not_spread_to_siblings() {
        let transport = ScriptedTransport::new()
            .respond("{a}", json!({"data": {"a": 1}}))
            .respond("{c}", json!({"data": {"c": 3}}));
        let (runner, _) = runner(transport, MemoryStore::default());

        let report = runner
            .run(
                &spec(),
                SuiteSource::Inline(vec![
                    TestCaseDescriptor::query("a", "{a}").with_expected(json!({"a": 1})),
                    // Unknown query: scripted transport answers with errors.
                    TestCaseDescriptor::query("b", "{b}"),
                    TestCaseDescriptor::query("c", "{c}").with_expected(json!({"c": 3})),
                ]),
            )
            .await;

        assert_eq!(report.tests.len(), 3);
        assert_eq!(report.passed(), 2);
        assert!(report.tests[0].passed());
        assert!(!report.tests[1].passed());
        assert!(report.tests[2].passed());
    }

    #[tokio::test]
    async fn test_transport_strictness_accepts_errors_payload() {
        let transport = ScriptedTransport::new();
        let (runner, _) = runner(transport, MemoryStore::default());

        let report = runner
            .run(
                &spec().with_success_mode(SuccessMode::Transport),
                SuiteSource::Inline(vec![TestCaseDescriptor::query("errors-ok", "{b}")]),
            )
            .await;

        assert!(report.all_passed());
    }

    #[tokio::test]
    async fn test_missing_source_file_registers_one_synthetic_failure() {
        let (runner, observer) = runner(ScriptedTransport::new(), MemoryStore::default());

        let report = runner
            .run(&spec(), SuiteSource::File(PathBuf::from("suites/absent.json")))
            .await;

        assert_eq!(report.tests.len(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.tests[0].label(), "suites/absent.json");
        let message = report.tests[0].failure_message().expect("failed");
        assert!(message.contains("suites/absent.json"));
        assert_eq!(observer.completed.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn test_suite_source_file_expands() {
        let transport =
            ScriptedTransport::new().respond("{__typename}", json!({"data": {"__typename": "Query"}}));
        let store = MemoryStore::default().with_file(
            "suites/smoke.json",
            r#"[{"label": "typename", "query": "{__typename}", "expected": {"__typename": "Query"}}]"#,
        );
        let (runner, _) = runner(transport, store);

        let report = runner
            .run(&spec(), SuiteSource::File(PathBuf::from("suites/smoke.json")))
            .await;

        assert_eq!(report.tests.len(), 1);
        assert!(report.all_passed());
    }

    #[tokio::test]
    async fn test_directory_fixture_uses_unit_label() {
        let transport =
            ScriptedTransport::new().respond("{human {name}}", json!({"data": {"human": {"name": "Luke Skywalker"}}}));
        let store = MemoryStore::default()
            .with_dir("expected")
            .with_file("expected/human-1000.json", r#"{"human":{"name":"Luke Skywalker"}}"#);
        let (runner, _) = runner(transport, store);

        let report = runner
            .run(
                &spec(),
                SuiteSource::Inline(vec![
                    TestCaseDescriptor::query("human-1000", "{human {name}}").with_expected(json!("expected")),
                ]),
            )
            .await;

        assert!(report.all_passed(), "{:?}", report.tests[0]);
    }

    #[tokio::test]
    async fn test_per_unit_fixture_failure_fails_only_that_unit() {
        let transport = ScriptedTransport::new().respond("{a}", json!({"data": {"a": 1}}));
        let (runner, _) = runner(transport, MemoryStore::default());

        let report = runner
            .run(
                &spec(),
                SuiteSource::Inline(vec![
                    TestCaseDescriptor::query("bad-fixture", "{a}").with_expected(json!("missing.json")),
                    TestCaseDescriptor::query("good", "{a}").with_expected(json!({"a": 1})),
                ]),
            )
            .await;

        assert_eq!(report.passed(), 1);
        let message = report.tests[0].failure_message().expect("failed");
        assert!(message.contains("missing.json"));
    }

    #[tokio::test]
    async fn test_descriptor_without_label_fails_that_unit() {
        let transport = ScriptedTransport::new().respond("{a}", json!({"data": {"a": 1}}));
        let (runner, _) = runner(transport, MemoryStore::default());

        let unlabeled = TestCaseDescriptor {
            query: Some("{a}".to_string()),
            ..TestCaseDescriptor::default()
        };

        let report = runner
            .run(&spec(), SuiteSource::Inline(vec![unlabeled]))
            .await;

        assert_eq!(report.tests[0].label(), "case-0");
        let message = report.tests[0].failure_message().expect("failed");
        assert!(message.contains("label"));
    }

    #[tokio::test]
    async fn test_timeout_is_reported_not_hung() {
        let transport = ScriptedTransport::new().with_delay(Duration::from_millis(250));
        let (runner, _) = runner(transport, MemoryStore::default());

        let report = runner
            .run(
                &spec().with_timeout(Duration::from_millis(20)),
                SuiteSource::Inline(vec![TestCaseDescriptor::query("slow", "{a}")]),
            )
            .await;

        assert_eq!(
            report.tests[0].outcome,
            TestOutcome::TimedOut { timeout_ms: 20 }
        );
    }
}

