//! HTTP protocol layer module
//!
//! Adapts hyper requests and responses to the router's envelope types.

pub mod response;
pub mod service;

pub use response::build_envelope_response;
pub use service::handle_request;
