//! SubscribeEmailHandler - newsletter opt-in from anywhere in the product.
//!
//! Upserts by email; if that fails a plain insert is tried. Either way an
//! `email_subscribed` event follows. Storage problems never reach the caller.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::engagement::{
    ClientMetadata, EmailAddress, EmailSubscriber, EngagementEvent, SubscriptionSource,
    EMAIL_SUBSCRIBED,
};
use crate::domain::foundation::SubscriberId;
use crate::ports::{AnalyticsEventRepository, SubscriberRepository};

use super::{parse_assessment_ref, EmailError};

#[derive(Debug, Clone, Default)]
pub struct SubscribeEmailCommand {
    pub email: String,
    pub source: Option<String>,
    pub mbti_type: Option<String>,
    pub superpower: Option<String>,
    pub assessment_id: Option<String>,
    pub client: ClientMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeEmailResult {
    /// Absent when both writes failed.
    pub subscriber_id: Option<SubscriberId>,
}

pub struct SubscribeEmailHandler {
    subscribers: Arc<dyn SubscriberRepository>,
    events: Arc<dyn AnalyticsEventRepository>,
}

impl SubscribeEmailHandler {
    pub fn new(
        subscribers: Arc<dyn SubscriberRepository>,
        events: Arc<dyn AnalyticsEventRepository>,
    ) -> Self {
        Self {
            subscribers,
            events,
        }
    }

    pub async fn handle(&self, cmd: SubscribeEmailCommand) -> Result<SubscribeEmailResult, EmailError> {
        let email = EmailAddress::parse(&cmd.email)?;
        let assessment_id = parse_assessment_ref(cmd.assessment_id.as_deref());
        let source = cmd
            .source
            .clone()
            .map(SubscriptionSource::from)
            .unwrap_or(SubscriptionSource::Direct);

        // 1. Upsert with full metadata
        let mut metadata = Map::new();
        insert_opt(&mut metadata, "mbti_type", cmd.mbti_type.clone());
        insert_opt(&mut metadata, "superpower", cmd.superpower.clone());
        metadata.insert("ip_address".into(), Value::String(cmd.client.ip_address.clone()));
        metadata.insert("subscribed_via".into(), Value::String("api".into()));

        let subscriber = EmailSubscriber::new(email.clone(), source.clone())
            .with_assessment(assessment_id)
            .with_metadata(metadata);

        let subscriber_id = match self.subscribers.upsert(&subscriber).await {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(write = "subscriber_upsert", error = %err, "Subscriber upsert failed, trying plain insert");

                // 2. Plain insert without the extras
                let plain = EmailSubscriber::new(email.clone(), source.clone());
                match self.subscribers.insert(&plain).await {
                    Ok(id) => Some(id),
                    Err(err) => {
                        tracing::error!(write = "subscriber_insert", error = %err, "Subscriber insert failed");
                        None
                    }
                }
            }
        };

        // 3. Analytics
        let mut payload = Map::new();
        payload.insert("email".into(), Value::String(email.as_str().to_string()));
        insert_opt(&mut payload, "source", cmd.source);
        insert_opt(&mut payload, "mbti_type", cmd.mbti_type.clone());
        insert_opt(&mut payload, "superpower", cmd.superpower.clone());

        match EngagementEvent::new(EMAIL_SUBSCRIBED, payload, cmd.client) {
            Ok(event) => {
                if let Err(err) = self.events.insert(&event.with_assessment(assessment_id)).await {
                    tracing::error!(write = "event_insert", error = %err, "Failed to store analytics event");
                }
            }
            Err(err) => tracing::error!(error = %err, "Failed to build analytics event"),
        }

        tracing::info!(
            mbti_type = cmd.mbti_type.as_deref().unwrap_or("unknown"),
            superpower = cmd.superpower.as_deref().unwrap_or("unknown"),
            "Welcome email disabled; subscription stored without sending"
        );

        Ok(SubscribeEmailResult { subscriber_id })
    }
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value));
    }
}
