//! Gqlprobe - a test harness for GraphQL-over-HTTP endpoints.
//!
//! The harness issues requests against an endpoint, validates
//! transport- and protocol-level success, and compares response
//! payloads against expected fixtures: inline values, JSON files, or
//! directories keyed by test label. Suites can be declared as
//! in-memory descriptor tables or JSON files; each descriptor expands
//! into one independently executed, independently failing test unit
//! with failure diagnostics reported through `tracing`.
//!
//! ```no_run
//! use gqlprobe::{GraphQLRequest, Harness, HeaderSource, TestCaseDescriptor};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let harness = Harness::builder("https://example.com/starwars/graphql").build()?;
//!
//! // One-off execution with protocol success and payload checking.
//! let headers = HeaderSource::factory(gqlprobe::HeaderSet::new);
//! harness
//!     .execute_ok(
//!         &GraphQLRequest::query("{hero {name}}"),
//!         &headers,
//!         Some(&json!({"hero": {"name": "R2-D2"}})),
//!     )
//!     .await?;
//!
//! // Table-driven suite.
//! let report = harness
//!     .run_suite(
//!         "starwars",
//!         gqlprobe::HeaderSet::new(),
//!         vec![
//!             TestCaseDescriptor::query("human", "query {human(id:1001) {name}}")
//!                 .with_expected(json!({"human": {"name": "Darth Vader"}})),
//!         ],
//!     )
//!     .await;
//! assert!(report.all_passed());
//! # Ok(())
//! # }
//! ```

mod harness;
pub mod suites;

pub use harness::{Harness, HarnessBuilder};
pub use suites::introspection_descriptors;

pub use gqlprobe_application::ports;
pub use gqlprobe_application::{
    DEFAULT_METHOD, DEFAULT_TEST_TIMEOUT, HarnessError, HarnessResult, HeaderSource, SuiteReport,
    SuiteSource, SuiteSpec, TestContext, TestOutcome, TestReport,
};
pub use gqlprobe_domain::{
    CompareMode, DEFAULT_ACCEPT, GraphQLRequest, HEADER_OVERRIDES_ENV, HeaderSet,
    ResponseEnvelope, SuccessMode, TestCaseDescriptor, ValidationError, check_success,
    compare_to_expected,
};
pub use gqlprobe_infrastructure::{
    CliCredentialProvider, CredentialCommand, ReqwestTransport, SystemClock, TokioFixtureStore,
    TracingReporter,
};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initializes `tracing` output for harness diagnostics.
///
/// Respects `RUST_LOG`, defaulting to `info`. Safe to call more than
/// once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
