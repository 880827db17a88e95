//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Assessment handlers
    AnalysisOrchestrator, SubmissionError, SubmitAssessmentCommand, SubmitAssessmentHandler,
    // Engagement handlers
    EmailError, EngagementRecorder, RecordAssessmentCommand, RecordOutcome, SaveEmailCommand,
    SaveEmailHandler, SaveEmailResult, SubscribeEmailCommand, SubscribeEmailHandler,
    SubscribeEmailResult, TrackEventCommand, TrackEventError, TrackEventHandler, TrackEventResult,
    // Session driver
    AssessmentClient, ClientError,
};
