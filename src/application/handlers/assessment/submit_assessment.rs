//! SubmitAssessmentHandler - the server side of a submission.
//!
//! Validate, analyze, record, answer. Validation failures are the only
//! errors; analysis always yields a result and recording never fails the
//! request.

use std::sync::Arc;

use crate::application::handlers::engagement::{EngagementRecorder, RecordAssessmentCommand};
use crate::domain::assessment::{Submission, SubmissionReceipt};
use crate::domain::engagement::{ClientMetadata, EmailAddress};

use super::{AnalysisOrchestrator, SubmissionError};

/// A submission plus who sent it.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentCommand {
    pub submission: Submission,
    pub client: ClientMetadata,
}

pub struct SubmitAssessmentHandler {
    orchestrator: Arc<AnalysisOrchestrator>,
    recorder: Arc<EngagementRecorder>,
}

impl SubmitAssessmentHandler {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>, recorder: Arc<EngagementRecorder>) -> Self {
        Self {
            orchestrator,
            recorder,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAssessmentCommand,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let SubmitAssessmentCommand { submission, client } = cmd;

        // 1. Validate and analyze; nothing is persisted for a rejected submission
        let analysis = match self.orchestrator.analyze(&submission.answers).await {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    answers = submission.answers.len(),
                    "Rejected assessment submission"
                );
                return Err(err);
            }
        };

        // 2. A malformed email only costs the subscription
        let email = submission
            .email
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match EmailAddress::parse(raw) {
                Ok(email) => Some(email),
                Err(err) => {
                    tracing::warn!(error = %err, "Ignoring invalid submission email");
                    None
                }
            });

        // 3. Best-effort persistence
        let outcome = self
            .recorder
            .record(RecordAssessmentCommand {
                answers: submission.answers,
                analysis: analysis.clone(),
                email,
                metadata: submission.metadata,
                client,
            })
            .await;

        Ok(SubmissionReceipt {
            assessment_id: outcome.assessment_id,
            analysis,
        })
    }
}
