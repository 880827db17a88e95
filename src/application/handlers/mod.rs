//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.
//!
//! - `assessment` - validation, analysis, and the submission use case
//! - `engagement` - recording assessments, email capture, event tracking
//! - `session` - the client-side session driver

pub mod assessment;
pub mod engagement;
pub mod session;

pub use assessment::{
    AnalysisOrchestrator, SubmissionError, SubmitAssessmentCommand, SubmitAssessmentHandler,
};
pub use engagement::{
    EmailError, EngagementRecorder, RecordAssessmentCommand, RecordOutcome, SaveEmailCommand,
    SaveEmailHandler, SaveEmailResult, SubscribeEmailCommand, SubscribeEmailHandler,
    SubscribeEmailResult, TrackEventCommand, TrackEventError, TrackEventHandler, TrackEventResult,
};
pub use session::{AssessmentClient, ClientError};
