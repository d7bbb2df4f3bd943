//! The harness facade: wiring and high-level operations.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use gqlprobe_application::ports::{
    Clock, CredentialError, CredentialProvider, FixtureStore, GraphQLTransport, TestObserver,
};
use gqlprobe_application::{
    DEFAULT_METHOD, DEFAULT_TEST_TIMEOUT, FixtureResolver, HarnessError, HarnessResult,
    HeaderSource, RequestExecutor, SuiteReport, SuiteRunner, SuiteSource, SuiteSpec, TestContext,
};
use gqlprobe_domain::{
    CompareMode, GraphQLRequest, HeaderSet, ResponseEnvelope, SuccessMode, check_success,
    compare_to_expected,
};
use gqlprobe_infrastructure::{ReqwestTransport, SystemClock, TokioFixtureStore, TracingReporter};
use serde_json::Value;
use url::Url;

/// A configured harness bound to one endpoint.
///
/// Construct with [`Harness::builder`]; defaults wire the reqwest
/// transport, the filesystem fixture store, the system clock and the
/// tracing failure reporter.
pub struct Harness {
    endpoint: String,
    executor: RequestExecutor,
    resolver: FixtureResolver,
    runner: SuiteRunner,
    fixtures: Arc<dyn FixtureStore>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    timeout: Duration,
    success_mode: SuccessMode,
    compare_mode: CompareMode,
}

impl Harness {
    /// Starts building a harness for the given endpoint URL.
    #[must_use]
    pub fn builder(endpoint: impl Into<String>) -> HarnessBuilder {
        HarnessBuilder::new(endpoint)
    }

    /// Returns the endpoint this harness targets.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Executes one request, checking nothing beyond transport
    /// completion.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as hard errors.
    pub async fn execute(
        &self,
        request: &GraphQLRequest,
        headers: &HeaderSource,
    ) -> HarnessResult<ResponseEnvelope> {
        let mut ctx = TestContext::new("adhoc", &self.endpoint);
        self.execute_with_context(request, DEFAULT_METHOD, headers, &mut ctx)
            .await
    }

    /// Executes one request, capturing timing and the response on the
    /// supplied context for later diagnostics.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as hard errors.
    pub async fn execute_with_context(
        &self,
        request: &GraphQLRequest,
        method: &str,
        headers: &HeaderSource,
        ctx: &mut TestContext,
    ) -> HarnessResult<ResponseEnvelope> {
        self.executor
            .execute(&self.endpoint, request, method, headers, ctx)
            .await
    }

    /// Executes one request requiring protocol success (status 200 and
    /// no request-level errors), optionally comparing the payload
    /// against an expected value.
    ///
    /// # Errors
    ///
    /// Transport failures, success-check failures, and payload
    /// mismatches.
    pub async fn execute_ok(
        &self,
        request: &GraphQLRequest,
        headers: &HeaderSource,
        expected: Option<&Value>,
    ) -> HarnessResult<ResponseEnvelope> {
        let envelope = self.execute(request, headers).await?;
        check_success(&envelope, SuccessMode::Protocol)?;
        if let Some(expected) = expected {
            compare_to_expected(&envelope.body, expected, self.compare_mode)?;
        }
        Ok(envelope)
    }

    /// Runs a table-driven suite against this harness's endpoint.
    ///
    /// The source may be an in-memory descriptor list or a JSON file;
    /// a source that fails to load degrades to a report with a single
    /// failing test so other suites keep running.
    pub async fn run_suite(
        &self,
        label: impl Into<String>,
        headers: impl Into<HeaderSource>,
        source: impl Into<SuiteSource>,
    ) -> SuiteReport {
        let spec = SuiteSpec::new(label, &self.endpoint, headers)
            .with_success_mode(self.success_mode)
            .with_compare_mode(self.compare_mode)
            .with_timeout(self.timeout);
        self.runner.run(&spec, source.into()).await
    }

    /// Builds headers authorized with the admin-level secret.
    ///
    /// # Errors
    ///
    /// [`CredentialError::NotConfigured`] without a provider; provider
    /// failures propagate as hard errors.
    pub async fn admin_headers(&self) -> HarnessResult<HeaderSet> {
        let key = self.credentials()?.admin_key().await?;
        Ok(HeaderSet::new().with_api_key(key))
    }

    /// Builds headers authorized with the regular-level secret.
    ///
    /// # Errors
    ///
    /// [`CredentialError::NotConfigured`] without a provider; provider
    /// failures propagate as hard errors.
    pub async fn regular_headers(&self) -> HarnessResult<HeaderSet> {
        let key = self.credentials()?.api_key().await?;
        Ok(HeaderSet::new().with_api_key(key))
    }

    /// Builds unauthenticated default headers.
    #[must_use]
    pub fn public_headers(&self) -> HeaderSet {
        HeaderSet::new()
    }

    /// Loads a query operations document for use as request `query`
    /// text.
    ///
    /// # Errors
    ///
    /// Fixture-store failures (missing or unreadable file).
    pub async fn load_document(&self, path: impl AsRef<Path>) -> HarnessResult<String> {
        Ok(self.fixtures.read_to_string(path.as_ref()).await?)
    }

    /// Resolves an expected specification the way suite execution
    /// does: inline values are identity, strings load files, and
    /// directories are keyed by `label`.
    ///
    /// # Errors
    ///
    /// Fixture load and parse failures.
    pub async fn resolve_expected(
        &self,
        value: Value,
        label: Option<&str>,
    ) -> HarnessResult<Value> {
        let spec = self.resolver.classify(value).await;
        Ok(self.resolver.resolve(&spec, label).await?)
    }

    fn credentials(&self) -> Result<&Arc<dyn CredentialProvider>, CredentialError> {
        self.credentials
            .as_ref()
            .ok_or(CredentialError::NotConfigured)
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("success_mode", &self.success_mode)
            .field("compare_mode", &self.compare_mode)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Harness`].
pub struct HarnessBuilder {
    endpoint: String,
    transport: Option<Arc<dyn GraphQLTransport>>,
    fixtures: Option<Arc<dyn FixtureStore>>,
    clock: Option<Arc<dyn Clock>>,
    observer: Option<Arc<dyn TestObserver>>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    timeout: Duration,
    success_mode: SuccessMode,
    compare_mode: CompareMode,
}

impl HarnessBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport: None,
            fixtures: None,
            clock: None,
            observer: None,
            credentials: None,
            timeout: DEFAULT_TEST_TIMEOUT,
            success_mode: SuccessMode::default(),
            compare_mode: CompareMode::default(),
        }
    }

    /// Replaces the transport adapter.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn GraphQLTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the fixture store.
    #[must_use]
    pub fn with_fixture_store(mut self, fixtures: Arc<dyn FixtureStore>) -> Self {
        self.fixtures = Some(fixtures);
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replaces the post-test observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Installs a credential provider for authenticated header
    /// factories.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the per-test timeout for suite runs.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the success strictness for suite runs and `execute_ok`.
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

    /// Validates the endpoint and wires the harness.
    ///
    /// # Errors
    ///
    /// [`HarnessError::InvalidEndpoint`] for a malformed endpoint URL;
    /// transport construction failures.
    pub fn build(self) -> HarnessResult<Harness> {
        Url::parse(&self.endpoint)
            .map_err(|error| HarnessError::InvalidEndpoint(format!("{}: {error}", self.endpoint)))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let fixtures = self
            .fixtures
            .unwrap_or_else(|| Arc::new(TokioFixtureStore::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(TracingReporter::new()));

        let executor = RequestExecutor::new(transport, clock);
        let resolver = FixtureResolver::new(Arc::clone(&fixtures));
        let runner = SuiteRunner::new(executor.clone(), resolver.clone(), observer);

        Ok(Harness {
            endpoint: self.endpoint,
            executor,
            resolver,
            runner,
            fixtures,
            credentials: self.credentials,
            timeout: self.timeout,
            success_mode: self.success_mode,
            compare_mode: self.compare_mode,
        })
    }
}

impl std::fmt::Debug for HarnessBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarnessBuilder")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
