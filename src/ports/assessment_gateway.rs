//! Assessment gateway port - how a session reaches the analysis service.

use async_trait::async_trait;

use crate::domain::assessment::{Submission, SubmissionReceipt};

/// Errors surfaced to the session when a submission does not produce a result.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The service refused the submission as invalid.
    #[error("submission rejected: {message}")]
    Rejected { message: String },

    /// The service could not be reached or failed outright.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with something that is not a receipt.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn rejected(message: impl Into<String>) -> Self {
        GatewayError::Rejected {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait AssessmentGateway: Send + Sync {
    /// Submits a completed answer set and waits for the analysis.
    async fn submit(&self, submission: Submission) -> Result<SubmissionReceipt, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn AssessmentGateway) {}
    }
}
