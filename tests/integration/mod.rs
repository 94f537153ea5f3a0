//! Integration tests
//!
//! End-to-end engine flows, the HTTP store accessor against a mock backend,
//! and the SSE transport against a mock feed endpoint.

pub mod controller_test;
pub mod http_api_test;
