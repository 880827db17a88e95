//! Messages exchanged across the submission boundary.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssessmentId, Timestamp};
use crate::domain::personality::PersonalityAnalysis;

/// A (question, option) identifier pair as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub option_id: String,
}

impl SubmittedAnswer {
    pub fn new(question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            option_id: option_id.into(),
        }
    }
}

/// Client-side context sent with a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMetadata {
    pub user_agent: Option<String>,
    pub start_time: Option<Timestamp>,
    pub completion_time: Option<Timestamp>,
}

/// A completed answer set on its way to analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub answers: Vec<SubmittedAnswer>,
    pub email: Option<String>,
    pub metadata: SubmissionMetadata,
}

impl Submission {
    pub fn new(answers: Vec<SubmittedAnswer>) -> Self {
        Self {
            answers,
            email: None,
            metadata: SubmissionMetadata::default(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_metadata(mut self, metadata: SubmissionMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.metadata.user_agent = Some(user_agent.into());
        self
    }
}

/// What comes back from a successful submission.
///
/// `assessment_id` is absent when the record could not be stored; that is a
/// normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub assessment_id: Option<AssessmentId>,
    pub analysis: PersonalityAnalysis,
}
