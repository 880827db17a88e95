//! Wire types for the assessment endpoints.
//!
//! Shared with the HTTP gateway so client and server agree on one format.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{
    Submission, SubmissionMetadata, SubmissionReceipt, SubmittedAnswer,
};
use crate::domain::catalog::{Category, Dimension, Question};
use crate::domain::foundation::Timestamp;
use crate::domain::personality::{
    AnalysisSource, PersonalityAnalysis, FALLBACK_EXPLANATION_PREFIX,
};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub responses: Vec<ResponseDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    pub question_id: String,
    pub selected_option_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<String>,
}

impl AnalyzeRequest {
    /// Unparseable client times are dropped.
    pub fn into_submission(self) -> Submission {
        let answers = self
            .responses
            .into_iter()
            .map(|r| SubmittedAnswer::new(r.question_id, r.selected_option_id))
            .collect();

        let metadata = self
            .metadata
            .map(|m| SubmissionMetadata {
                user_agent: m.user_agent,
                start_time: m.start_time.as_deref().and_then(Timestamp::parse_rfc3339),
                completion_time: m.completion_time.as_deref().and_then(Timestamp::parse_rfc3339),
            })
            .unwrap_or_default();

        Submission {
            answers,
            email: self.email.filter(|e| !e.trim().is_empty()),
            metadata,
        }
    }
}

impl From<&Submission> for AnalyzeRequest {
    fn from(submission: &Submission) -> Self {
        Self {
            responses: submission
                .answers
                .iter()
                .map(|a| ResponseDto {
                    question_id: a.question_id.clone(),
                    selected_option_id: a.option_id.clone(),
                })
                .collect(),
            email: submission.email.clone(),
            metadata: Some(MetadataDto {
                user_agent: submission.metadata.user_agent.clone(),
                start_time: submission.metadata.start_time.map(|t| t.to_rfc3339()),
                completion_time: submission.metadata.completion_time.map(|t| t.to_rfc3339()),
            }),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    /// Null when the record could not be stored.
    pub assessment_id: Option<String>,
    pub analysis: AnalysisDto,
}

impl From<&SubmissionReceipt> for AnalyzeResponse {
    fn from(receipt: &SubmissionReceipt) -> Self {
        Self {
            success: true,
            assessment_id: receipt.assessment_id.map(|id| id.to_string()),
            analysis: AnalysisDto::from(&receipt.analysis),
        }
    }
}

/// The public fields of an analysis. The source marker stays server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDto {
    pub mbti_type: String,
    pub confidence: u32,
    pub superpower_title: String,
    pub explanation: String,
    pub strengths: Vec<String>,
    pub kryptonite: String,
    pub career_insight: String,
    pub fun_fact: String,
}

impl From<&PersonalityAnalysis> for AnalysisDto {
    fn from(a: &PersonalityAnalysis) -> Self {
        Self {
            mbti_type: a.mbti_type.clone(),
            confidence: a.confidence,
            superpower_title: a.superpower_title.clone(),
            explanation: a.explanation.clone(),
            strengths: a.strengths.clone(),
            kryptonite: a.kryptonite.clone(),
            career_insight: a.career_insight.clone(),
            fun_fact: a.fun_fact.clone(),
        }
    }
}

impl AnalysisDto {
    /// Rebuilds an analysis on the client side, recovering the source from
    /// the in-band degraded marker.
    pub fn into_analysis(self) -> PersonalityAnalysis {
        let source = if self.explanation.starts_with(FALLBACK_EXPLANATION_PREFIX) {
            AnalysisSource::Fallback
        } else {
            AnalysisSource::Ai
        };
        PersonalityAnalysis {
            mbti_type: self.mbti_type,
            confidence: self.confidence,
            superpower_title: self.superpower_title,
            explanation: self.explanation,
            strengths: self.strengths,
            kryptonite: self.kryptonite,
            career_insight: self.career_insight,
            fun_fact: self.fun_fact,
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub id: String,
    pub category: Category,
    pub dimension: Dimension,
    pub scenario: String,
    pub question: String,
    pub options: Vec<OptionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionDto {
    pub id: String,
    pub text: String,
}

impl From<&Question> for QuestionDto {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.to_string(),
            category: q.category,
            dimension: q.dimension,
            scenario: q.scenario.to_string(),
            question: q.prompt.to_string(),
            options: q
                .options
                .iter()
                .map(|o| OptionDto {
                    id: o.id.to_string(),
                    text: o.text.to_string(),
                })
                .collect(),
        }
    }
}
