//! Shared application state.

use std::sync::Arc;

use crate::application::handlers::assessment::{AnalysisOrchestrator, SubmitAssessmentHandler};
use crate::application::handlers::engagement::{
    EngagementRecorder, SaveEmailHandler, SubscribeEmailHandler, TrackEventHandler,
};
use crate::domain::catalog::QuestionCatalog;
use crate::ports::{
    AIProvider, AnalyticsEventRepository, AssessmentRepository, PersonalityAnalyzer,
    SubscriberRepository,
};

/// Dependencies of every route, cloned per request.
///
/// Handlers are built on demand from the Arc-wrapped ports.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub recorder: Arc<EngagementRecorder>,
    pub event_repository: Arc<dyn AnalyticsEventRepository>,
    pub subscriber_repository: Arc<dyn SubscriberRepository>,
    /// Absent in fallback-only mode.
    pub ai_provider: Option<Arc<dyn AIProvider>>,
}

impl AppState {
    pub fn new(
        analyzer: Arc<dyn PersonalityAnalyzer>,
        assessment_repository: Arc<dyn AssessmentRepository>,
        event_repository: Arc<dyn AnalyticsEventRepository>,
        subscriber_repository: Arc<dyn SubscriberRepository>,
    ) -> Self {
        let recorder = EngagementRecorder::new(
            assessment_repository,
            event_repository.clone(),
            subscriber_repository.clone(),
        );
        Self {
            orchestrator: Arc::new(AnalysisOrchestrator::new(analyzer)),
            recorder: Arc::new(recorder),
            event_repository,
            subscriber_repository,
            ai_provider: None,
        }
    }

    pub fn with_ai_provider(mut self, provider: Arc<dyn AIProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn catalog(&self) -> &'static QuestionCatalog {
        self.orchestrator.catalog()
    }

    pub fn submit_assessment_handler(&self) -> SubmitAssessmentHandler {
        SubmitAssessmentHandler::new(self.orchestrator.clone(), self.recorder.clone())
    }

    pub fn subscribe_email_handler(&self) -> SubscribeEmailHandler {
        SubscribeEmailHandler::new(
            self.subscriber_repository.clone(),
            self.event_repository.clone(),
        )
    }

    pub fn save_email_handler(&self) -> SaveEmailHandler {
        SaveEmailHandler::new(self.subscriber_repository.clone())
    }

    pub fn track_event_handler(&self) -> TrackEventHandler {
        TrackEventHandler::new(self.event_repository.clone())
    }
}
