//! Stored assessment outcome.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::assessment::SubmittedAnswer;
use crate::domain::foundation::{AssessmentId, Timestamp};
use crate::domain::personality::PersonalityAnalysis;

use super::{ClientMetadata, EmailAddress};

/// Everything persisted about one analyzed submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub email: Option<EmailAddress>,
    pub answers: Vec<SubmittedAnswer>,
    pub analysis: PersonalityAnalysis,
    pub client: ClientMetadata,
    /// As reported by the client.
    pub started_at: Option<Timestamp>,
    /// As reported by the client.
    pub client_completed_at: Option<Timestamp>,
    pub completed_at: Timestamp,
}

impl AssessmentRecord {
    pub fn new(
        answers: Vec<SubmittedAnswer>,
        analysis: PersonalityAnalysis,
        client: ClientMetadata,
    ) -> Self {
        Self {
            id: AssessmentId::new(),
            email: None,
            answers,
            analysis,
            client,
            started_at: None,
            client_completed_at: None,
            completed_at: Timestamp::now(),
        }
    }

    pub fn with_email(mut self, email: Option<EmailAddress>) -> Self {
        self.email = email;
        self
    }

    pub fn with_client_times(mut self, started_at: Option<Timestamp>, completed_at: Option<Timestamp>) -> Self {
        self.started_at = started_at;
        self.client_completed_at = completed_at;
        self
    }

    /// The narrative part of the analysis, stored as one JSON document.
    pub fn superpower_data(&self) -> Value {
        json!({
            "strengths": self.analysis.strengths,
            "kryptonite": self.analysis.kryptonite,
            "careerInsight": self.analysis.career_insight,
            "funFact": self.analysis.fun_fact,
        })
    }

    /// Submitted answers in wire form.
    pub fn responses_json(&self) -> Value {
        Value::Array(
            self.answers
                .iter()
                .map(|a| json!({ "questionId": a.question_id, "selectedOptionId": a.option_id }))
                .collect(),
        )
    }
}
