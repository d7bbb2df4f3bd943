//! Built-in descriptor collections.

use gqlprobe_domain::TestCaseDescriptor;

/// Smoke tests ensuring the endpoint answers introspection-style
/// queries. The requests are invoked with no expected data.
#[must_use]
pub fn introspection_descriptors() -> Vec<TestCaseDescriptor> {
    vec![
        TestCaseDescriptor::query("typename", "{__typename}"),
        // Endpoints set up for federation expose their schema document.
        TestCaseDescriptor::query("federation-service", "{_service { sdl }}"),
    ]
}
