//! EngagementRecorder - best-effort persistence of an analyzed submission.
//!
//! Three writes per submission: the assessment record, an
//! `assessment_completed` event, and (with an email) a subscriber upsert.
//! The record goes first so the other two can reference its id; the event
//! and the subscriber are then written concurrently. Every write is attempted
//! regardless of the others and failures are only logged.

use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::domain::assessment::{SubmissionMetadata, SubmittedAnswer};
use crate::domain::engagement::{
    AssessmentRecord, ClientMetadata, EmailAddress, EmailSubscriber, EngagementEvent,
    SubscriptionSource, ASSESSMENT_COMPLETED,
};
use crate::domain::foundation::AssessmentId;
use crate::domain::personality::PersonalityAnalysis;
use crate::ports::{AnalyticsEventRepository, AssessmentRepository, SubscriberRepository};

/// What to record for one analyzed submission.
#[derive(Debug, Clone)]
pub struct RecordAssessmentCommand {
    pub answers: Vec<SubmittedAnswer>,
    pub analysis: PersonalityAnalysis,
    pub email: Option<EmailAddress>,
    pub metadata: SubmissionMetadata,
    pub client: ClientMetadata,
}

/// Which writes succeeded. Never surfaced to the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub assessment_id: Option<AssessmentId>,
    pub event_recorded: bool,
    /// `None` when no email was given.
    pub subscriber_recorded: Option<bool>,
}

pub struct EngagementRecorder {
    assessments: Arc<dyn AssessmentRepository>,
    events: Arc<dyn AnalyticsEventRepository>,
    subscribers: Arc<dyn SubscriberRepository>,
}

impl EngagementRecorder {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        events: Arc<dyn AnalyticsEventRepository>,
        subscribers: Arc<dyn SubscriberRepository>,
    ) -> Self {
        Self {
            assessments,
            events,
            subscribers,
        }
    }

    pub async fn record(&self, cmd: RecordAssessmentCommand) -> RecordOutcome {
        // The event's user agent prefers what the client reported in the body.
        let user_agent = cmd
            .metadata
            .user_agent
            .clone()
            .or_else(|| cmd.client.user_agent.clone());

        let record = AssessmentRecord::new(cmd.answers, cmd.analysis, cmd.client.clone())
            .with_email(cmd.email.clone())
            .with_client_times(cmd.metadata.start_time, cmd.metadata.completion_time);

        let assessment_id = match self.assessments.insert(&record).await {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(write = "assessment_insert", error = %err, "Failed to store assessment");
                None
            }
        };

        let event_client = ClientMetadata::new(cmd.client.ip_address.clone(), user_agent.clone());
        let event_write = self.record_event(&record, assessment_id, event_client, user_agent);
        let subscriber_write = async {
            match &cmd.email {
                Some(email) => Some(self.record_subscriber(email.clone(), assessment_id).await),
                None => None,
            }
        };

        let (event_recorded, subscriber_recorded) = futures::join!(event_write, subscriber_write);

        RecordOutcome {
            assessment_id,
            event_recorded,
            subscriber_recorded,
        }
    }

    async fn record_event(
        &self,
        record: &AssessmentRecord,
        assessment_id: Option<AssessmentId>,
        client: ClientMetadata,
        user_agent: Option<String>,
    ) -> bool {
        let mut payload = Map::new();
        payload.insert("mbti_type".into(), json!(record.analysis.mbti_type));
        payload.insert("confidence".into(), json!(record.analysis.confidence));
        payload.insert(
            "completion_time".into(),
            record
                .client_completed_at
                .map(|t| Value::String(t.to_rfc3339()))
                .unwrap_or(Value::Null),
        );
        payload.insert(
            "user_agent".into(),
            user_agent.map(Value::String).unwrap_or(Value::Null),
        );

        let event = match EngagementEvent::new(ASSESSMENT_COMPLETED, payload, client) {
            Ok(event) => event.with_assessment(assessment_id),
            Err(err) => {
                tracing::error!(write = "event_insert", error = %err, "Failed to build event");
                return false;
            }
        };

        match self.events.insert(&event).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(write = "event_insert", error = %err, "Failed to store analytics event");
                false
            }
        }
    }

    async fn record_subscriber(
        &self,
        email: EmailAddress,
        assessment_id: Option<AssessmentId>,
    ) -> bool {
        let subscriber = EmailSubscriber::new(email, SubscriptionSource::AssessmentCompletion)
            .with_assessment(assessment_id);

        match self.subscribers.upsert(&subscriber).await {
            Ok(_) => true,
            Err(err) => {
                tracing::error!(write = "subscriber_upsert", error = %err, "Failed to store subscriber");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEngagementStore, StoreWrite};
    use crate::domain::foundation::Timestamp;

    fn recorder(store: &InMemoryEngagementStore) -> EngagementRecorder {
        let store = Arc::new(store.clone());
        EngagementRecorder::new(store.clone(), store.clone(), store)
    }

    fn command(email: Option<&str>) -> RecordAssessmentCommand {
        RecordAssessmentCommand {
            answers: vec![SubmittedAnswer::new("q1_energy", "q1_a")],
            analysis: PersonalityAnalysis::fallback(),
            email: email.map(|e| EmailAddress::parse(e).unwrap()),
            metadata: SubmissionMetadata {
                user_agent: Some("body-agent".into()),
                start_time: None,
                completion_time: Timestamp::parse_rfc3339("2025-03-01T10:00:00Z"),
            },
            client: ClientMetadata::new("10.0.0.1", Some("header-agent".into())),
        }
    }

    #[tokio::test]
    async fn happy_path_writes_all_three() {
        let store = InMemoryEngagementStore::new();

        let outcome = recorder(&store).record(command(Some("a@b.co"))).await;

        let id = outcome.assessment_id.unwrap();
        assert!(outcome.event_recorded);
        assert_eq!(outcome.subscriber_recorded, Some(true));

        let events = store.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, ASSESSMENT_COMPLETED);
        assert_eq!(events[0].assessment_id, Some(id));
        assert_eq!(events[0].payload["mbti_type"], "ENFP");
        assert_eq!(events[0].payload["user_agent"], "body-agent");

        let subscriber = store.subscriber("a@b.co").await.unwrap();
        assert_eq!(subscriber.assessment_id, Some(id));
        assert_eq!(subscriber.source, SubscriptionSource::AssessmentCompletion);
    }

    #[tokio::test]
    async fn no_email_skips_subscriber() {
        let store = InMemoryEngagementStore::new();

        let outcome = recorder(&store).record(command(None)).await;

        assert_eq!(outcome.subscriber_recorded, None);
        assert_eq!(store.attempts(StoreWrite::SubscriberUpsert).await, 0);
    }

    #[tokio::test]
    async fn failed_assessment_insert_still_attempts_other_writes() {
        let store = InMemoryEngagementStore::new();
        store.fail_on(StoreWrite::AssessmentInsert).await;

        let outcome = recorder(&store).record(command(Some("a@b.co"))).await;

        assert_eq!(outcome.assessment_id, None);
        assert!(outcome.event_recorded);
        assert_eq!(outcome.subscriber_recorded, Some(true));
        assert_eq!(store.events().await[0].assessment_id, None);
        assert_eq!(store.subscriber("a@b.co").await.unwrap().assessment_id, None);
    }

    #[tokio::test]
    async fn event_failure_does_not_block_subscriber() {
        let store = InMemoryEngagementStore::new();
        store.fail_on(StoreWrite::EventInsert).await;

        let outcome = recorder(&store).record(command(Some("a@b.co"))).await;

        assert!(outcome.assessment_id.is_some());
        assert!(!outcome.event_recorded);
        assert_eq!(outcome.subscriber_recorded, Some(true));
        assert_eq!(store.attempts(StoreWrite::EventInsert).await, 1);
    }

    #[tokio::test]
    async fn everything_failing_still_returns() {
        let store = InMemoryEngagementStore::new();
        store.fail_on(StoreWrite::AssessmentInsert).await;
        store.fail_on(StoreWrite::EventInsert).await;
        store.fail_on(StoreWrite::SubscriberUpsert).await;

        let outcome = recorder(&store).record(command(Some("a@b.co"))).await;

        assert_eq!(
            outcome,
            RecordOutcome {
                assessment_id: None,
                event_recorded: false,
                subscriber_recorded: Some(false),
            }
        );
        assert_eq!(store.attempts(StoreWrite::SubscriberUpsert).await, 1);
    }

    #[tokio::test]
    async fn record_keeps_client_times_and_email() {
        let store = InMemoryEngagementStore::new();

        recorder(&store).record(command(Some("a@b.co"))).await;

        let record = &store.assessments().await[0];
        assert_eq!(record.email.as_ref().map(|e| e.as_str()), Some("a@b.co"));
        assert!(record.client_completed_at.is_some());
        assert_eq!(record.client.ip_address, "10.0.0.1");
    }
}
