//! Session-specific error types.

use crate::domain::foundation::ErrorCode;

use super::Phase;

/// Rejections raised by session operations. A rejected operation leaves the
/// session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Operation not allowed in the current phase.
    InvalidPhase { operation: &'static str, phase: Phase },
    /// Question id is not in the catalog.
    UnknownQuestion(String),
    /// Option id does not belong to the question.
    UnknownOption { question_id: String, option_id: String },
    /// Tried to move forward without answering the current question.
    CurrentQuestionUnanswered,
    /// Not every question has an answer.
    Incomplete { answered: usize, required: usize },
    /// A submission is already in flight.
    SubmissionInFlight,
    /// A stored session breaks an aggregate invariant.
    InvalidSnapshot(String),
}

impl SessionError {
    pub fn invalid_phase(operation: &'static str, phase: Phase) -> Self {
        SessionError::InvalidPhase { operation, phase }
    }

    pub fn invalid_snapshot(reason: impl Into<String>) -> Self {
        SessionError::InvalidSnapshot(reason.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::InvalidPhase { .. } => ErrorCode::InvalidStateTransition,
            SessionError::UnknownQuestion(_) => ErrorCode::UnknownQuestion,
            SessionError::UnknownOption { .. } => ErrorCode::UnknownOption,
            SessionError::CurrentQuestionUnanswered => ErrorCode::ValidationFailed,
            SessionError::Incomplete { .. } => ErrorCode::ValidationFailed,
            SessionError::SubmissionInFlight => ErrorCode::InvalidStateTransition,
            SessionError::InvalidSnapshot(_) => ErrorCode::ValidationFailed,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::InvalidPhase { operation, phase } => {
                format!("Cannot {} while session is {}", operation, phase)
            }
            SessionError::UnknownQuestion(id) => format!("Unknown question: {}", id),
            SessionError::UnknownOption {
                question_id,
                option_id,
            } => format!("Unknown option '{}' for question '{}'", option_id, question_id),
            SessionError::CurrentQuestionUnanswered => {
                "Answer the current question before moving on".to_string()
            }
            SessionError::Incomplete { answered, required } => format!(
                "All questions must be answered before submission ({} of {})",
                answered, required
            ),
            SessionError::SubmissionInFlight => "A submission is already in progress".to_string(),
            SessionError::InvalidSnapshot(reason) => format!("Invalid session snapshot: {}", reason),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}
