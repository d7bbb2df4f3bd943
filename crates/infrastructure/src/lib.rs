//! Gqlprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined
//! in the application layer: the reqwest transport, the filesystem
//! fixture store, the system clock, the external-CLI credential
//! provider, and the tracing failure reporter.

pub mod adapters;
pub mod credentials;
pub mod fixtures;
pub mod reporting;

pub use adapters::{ReqwestTransport, SystemClock};
pub use credentials::{CliCredentialProvider, CredentialCommand};
pub use fixtures::TokioFixtureStore;
pub use reporting::TracingReporter;
