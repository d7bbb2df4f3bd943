//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness core and external
//! systems. Each port is a trait implemented by adapters in the
//! infrastructure layer (or by test doubles).

mod clock;
mod credentials;
mod fixtures;
mod observer;
mod transport;

pub use clock::Clock;
pub use credentials::{CredentialError, CredentialProvider};
pub use fixtures::{FixtureError, FixtureStore};
pub use observer::{NullObserver, TestObserver};
pub use transport::{GraphQLTransport, RawResponse, TransportError};
