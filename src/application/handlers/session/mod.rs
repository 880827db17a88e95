//! Session handlers - drive one respondent's session from the client side.

mod assessment_client;

pub use assessment_client::{AssessmentClient, ClientError};
