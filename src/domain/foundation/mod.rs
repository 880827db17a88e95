//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, lifecycle state machines and the error vocabulary
//! shared by the assessment, personality and engagement modules.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AnalyticsEventId, AssessmentId, SubscriberId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
