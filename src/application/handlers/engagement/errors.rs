//! Errors of the email and analytics handlers.

use crate::domain::foundation::{ErrorCode, ValidationError};

/// The one way an email capture can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("Valid email address is required")]
    InvalidEmail(#[source] ValidationError),
}

impl EmailError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ValidationFailed
    }
}

impl From<ValidationError> for EmailError {
    fn from(err: ValidationError) -> Self {
        EmailError::InvalidEmail(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackEventError {
    #[error("event_type is required")]
    MissingEventType,

    #[error("Invalid event_data: {0}")]
    InvalidEventData(String),
}

impl TrackEventError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ValidationFailed
    }
}
