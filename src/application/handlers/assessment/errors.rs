//! Submission validation errors.

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::ErrorCode;

/// Why a submission was rejected before analysis.
///
/// These are the only failures a submitter ever sees; everything after
/// validation degrades to a fallback or a logged write failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Invalid request: {expected} responses required, got {actual}")]
    WrongAnswerCount { expected: usize, actual: usize },

    #[error("Invalid request: question '{0}' answered more than once")]
    DuplicateQuestion(String),

    #[error("Invalid question ID: {0}")]
    UnknownQuestion(String),

    #[error("Invalid option ID '{option_id}' for question '{question_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },
}

impl SubmissionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmissionError::WrongAnswerCount { .. } | SubmissionError::DuplicateQuestion(_) => {
                ErrorCode::ValidationFailed
            }
            SubmissionError::UnknownQuestion(_) => ErrorCode::UnknownQuestion,
            SubmissionError::UnknownOption { .. } => ErrorCode::UnknownOption,
        }
    }
}

impl From<CatalogError> for SubmissionError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownQuestion(id) => SubmissionError::UnknownQuestion(id),
            CatalogError::UnknownOption {
                question_id,
                option_id,
            } => SubmissionError::UnknownOption {
                question_id,
                option_id,
            },
        }
    }
}
