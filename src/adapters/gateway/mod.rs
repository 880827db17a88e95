//! Assessment gateway adapters.
//!
//! - `LocalAssessmentGateway` - calls the submission handler in-process
//! - `HttpAssessmentGateway` - posts to a running service

mod http_gateway;
mod local_gateway;

pub use http_gateway::HttpAssessmentGateway;
pub use local_gateway::LocalAssessmentGateway;
