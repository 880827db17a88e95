//! Assessment submission handlers.

mod analysis_orchestrator;
mod errors;
mod submit_assessment;

pub use analysis_orchestrator::AnalysisOrchestrator;
pub use errors::SubmissionError;
pub use submit_assessment::{SubmitAssessmentCommand, SubmitAssessmentHandler};
