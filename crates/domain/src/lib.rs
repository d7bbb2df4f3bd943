//! Gqlprobe Domain - Core harness types
//!
//! This crate defines the domain model for the gqlprobe GraphQL test
//! harness: header construction, request and response shapes, fixture
//! specifications, test case descriptors, and the pure validation logic
//! applied to responses. No I/O happens here.

pub mod compare;
pub mod descriptor;
pub mod error;
pub mod expected;
pub mod headers;
pub mod request;
pub mod response;
pub mod validator;

pub use compare::{Divergence, deep_compare};
pub use descriptor::TestCaseDescriptor;
pub use error::{DescriptorError, ValidationError};
pub use expected::{ExpectedSpec, fixture_file_name};
pub use headers::{DEFAULT_ACCEPT, HEADER_OVERRIDES_ENV, HeaderSet};
pub use request::GraphQLRequest;
pub use response::ResponseEnvelope;
pub use validator::{CompareMode, SuccessMode, check_success, compare_to_expected, is_root_rooted};
