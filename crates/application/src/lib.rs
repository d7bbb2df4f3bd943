//! Gqlprobe Application - Harness orchestration
//!
//! This crate wires the domain model to the outside world through
//! ports: request execution, fixture resolution, and table-driven
//! suite expansion all live here, independent of any concrete HTTP
//! client or filesystem.

pub mod context;
pub mod error;
pub mod executor;
pub mod ports;
pub mod resolver;
pub mod suite;

pub use context::{TestContext, TestOutcome, TestReport};
pub use error::{HarnessError, HarnessResult};
pub use executor::{DEFAULT_METHOD, HeaderSource, RequestExecutor};
pub use resolver::FixtureResolver;
pub use suite::{DEFAULT_TEST_TIMEOUT, SuiteReport, SuiteRunner, SuiteSource, SuiteSpec};
