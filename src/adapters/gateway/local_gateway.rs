//! In-process gateway for embedding the whole flow in one binary or test.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handlers::assessment::{SubmitAssessmentCommand, SubmitAssessmentHandler};
use crate::domain::assessment::{Submission, SubmissionReceipt};
use crate::domain::engagement::ClientMetadata;
use crate::ports::{AssessmentGateway, GatewayError};

pub struct LocalAssessmentGateway {
    handler: Arc<SubmitAssessmentHandler>,
    client: ClientMetadata,
}

impl LocalAssessmentGateway {
    pub fn new(handler: Arc<SubmitAssessmentHandler>) -> Self {
        Self {
            handler,
            client: ClientMetadata::default(),
        }
    }

    /// Client metadata attached to every submission.
    pub fn with_client(mut self, client: ClientMetadata) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl AssessmentGateway for LocalAssessmentGateway {
    async fn submit(&self, submission: Submission) -> Result<SubmissionReceipt, GatewayError> {
        self.handler
            .handle(SubmitAssessmentCommand {
                submission,
                client: self.client.clone(),
            })
            .await
            .map_err(|e| GatewayError::rejected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::analysis::FailoverAnalyzer;
    use crate::adapters::memory::InMemoryEngagementStore;
    use crate::application::handlers::assessment::AnalysisOrchestrator;
    use crate::application::handlers::engagement::EngagementRecorder;
    use crate::domain::assessment::SubmittedAnswer;

    fn gateway(store: &InMemoryEngagementStore) -> LocalAssessmentGateway {
        let repo = Arc::new(store.clone());
        let handler = SubmitAssessmentHandler::new(
            Arc::new(AnalysisOrchestrator::new(Arc::new(FailoverAnalyzer::fallback_only()))),
            Arc::new(EngagementRecorder::new(repo.clone(), repo.clone(), repo)),
        );
        LocalAssessmentGateway::new(Arc::new(handler))
            .with_client(ClientMetadata::new("10.1.1.1", None))
    }

    #[tokio::test]
    async fn rejection_maps_to_rejected() {
        let store = InMemoryEngagementStore::new();
        let submission = Submission::new(vec![SubmittedAnswer::new("q1_energy", "q1_a")]);

        let result = gateway(&store).submit(submission).await;

        assert!(matches!(result, Err(GatewayError::Rejected { .. })));
    }

    #[tokio::test]
    async fn uses_configured_client() {
        let store = InMemoryEngagementStore::new();
        let submission = Submission::new(
            crate::domain::catalog::QuestionCatalog::standard()
                .all_questions()
                .iter()
                .map(|q| SubmittedAnswer::new(q.id, q.options[3].id))
                .collect(),
        );

        gateway(&store).submit(submission).await.unwrap();

        assert_eq!(store.assessments().await[0].client.ip_address, "10.1.1.1");
    }
}
