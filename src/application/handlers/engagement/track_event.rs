//! TrackEventHandler - generic client-side analytics.

use std::sync::Arc;

use crate::domain::engagement::{ClientMetadata, EngagementEvent, EventPayload};
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::ports::AnalyticsEventRepository;

use super::{parse_assessment_ref, TrackEventError};

#[derive(Debug, Clone, Default)]
pub struct TrackEventCommand {
    pub event_type: Option<String>,
    pub event_data: EventPayload,
    pub assessment_id: Option<String>,
    /// RFC 3339; the server clock is used when absent or unparseable.
    pub timestamp: Option<String>,
    pub client: ClientMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEventResult {
    pub stored: bool,
}

pub struct TrackEventHandler {
    events: Arc<dyn AnalyticsEventRepository>,
}

impl TrackEventHandler {
    pub fn new(events: Arc<dyn AnalyticsEventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(&self, cmd: TrackEventCommand) -> Result<TrackEventResult, TrackEventError> {
        let event_type = cmd.event_type.unwrap_or_default();
        let event = EngagementEvent::new(event_type, cmd.event_data, cmd.client)
            .map_err(|err| match err {
                ValidationError::EmptyField { .. } => TrackEventError::MissingEventType,
                ValidationError::InvalidFormat { reason, .. } => TrackEventError::InvalidEventData(reason),
            })?
            .with_assessment(parse_assessment_ref(cmd.assessment_id.as_deref()));

        let event = match cmd.timestamp.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match Timestamp::parse_rfc3339(raw) {
                Some(at) => event.occurred_at(at),
                None => {
                    tracing::debug!(timestamp = raw, "Unparseable client timestamp, using server time");
                    event
                }
            },
            None => event,
        };

        match self.events.insert(&event).await {
            Ok(()) => Ok(TrackEventResult { stored: true }),
            Err(err) => {
                tracing::error!(
                    write = "event_insert",
                    event_type = %event.event_type,
                    error = %err,
                    "Analytics tracking error"
                );
                Ok(TrackEventResult { stored: false })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEngagementStore, StoreWrite};
    use serde_json::json;

    fn handler(store: &InMemoryEngagementStore) -> TrackEventHandler {
        TrackEventHandler::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn missing_event_type_is_rejected() {
        let store = InMemoryEngagementStore::new();

        let result = handler(&store).handle(TrackEventCommand::default()).await;

        assert_eq!(result, Err(TrackEventError::MissingEventType));
        assert_eq!(store.attempts(StoreWrite::EventInsert).await, 0);
    }

    #[tokio::test]
    async fn blank_event_type_is_rejected() {
        let store = InMemoryEngagementStore::new();
        let cmd = TrackEventCommand {
            event_type: Some("  ".into()),
            ..Default::default()
        };

        assert!(handler(&store).handle(cmd).await.is_err());
    }

    #[tokio::test]
    async fn nested_event_data_is_rejected_before_storage() {
        let store = InMemoryEngagementStore::new();
        let mut data = EventPayload::new();
        data.insert("context".into(), json!({"page": "results"}));

        let result = handler(&store)
            .handle(TrackEventCommand {
                event_type: Some("share_clicked".into()),
                event_data: data,
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(TrackEventError::InvalidEventData(_))));
        assert_eq!(store.attempts(StoreWrite::EventInsert).await, 0);
    }

    #[tokio::test]
    async fn stores_event_with_client_timestamp() {
        let store = InMemoryEngagementStore::new();
        let mut data = EventPayload::new();
        data.insert("button".into(), json!("share"));
        data.insert("count".into(), json!(2));
        data.insert("missing".into(), json!(null));

        let result = handler(&store)
            .handle(TrackEventCommand {
                event_type: Some("share_clicked".into()),
                event_data: data.clone(),
                timestamp: Some("2025-03-01T12:30:00Z".into()),
                client: ClientMetadata::new("1.2.3.4", Some("agent".into())),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(result.stored);
        let event = &store.events().await[0];
        assert_eq!(event.payload, data);
        assert_eq!(
            Some(event.occurred_at),
            Timestamp::parse_rfc3339("2025-03-01T12:30:00Z")
        );
        assert_eq!(event.client.ip_address, "1.2.3.4");
    }

    #[tokio::test]
    async fn bad_timestamp_falls_back_to_now() {
        let store = InMemoryEngagementStore::new();
        let before = Timestamp::now();

        handler(&store)
            .handle(TrackEventCommand {
                event_type: Some("page_view".into()),
                timestamp: Some("yesterday".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(store.events().await[0].occurred_at >= before);
    }

    #[tokio::test]
    async fn storage_failure_is_not_an_error() {
        let store = InMemoryEngagementStore::new();
        store.fail_on(StoreWrite::EventInsert).await;

        let result = handler(&store)
            .handle(TrackEventCommand {
                event_type: Some("page_view".into()),
                ..Default::default()
            })
            .await;

        assert_eq!(result, Ok(TrackEventResult { stored: false }));
    }
}
