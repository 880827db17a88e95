//! SaveEmailHandler - the results-page email box.
//!
//! A single plain insert tagged `results_page`. The caller hears success for
//! any valid address, stored or not.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::engagement::{EmailAddress, EmailSubscriber, SubscriptionSource};
use crate::domain::foundation::SubscriberId;
use crate::ports::SubscriberRepository;

use super::EmailError;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Default)]
pub struct SaveEmailCommand {
    pub email: String,
    pub mbti_type: Option<String>,
    pub superpower: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEmailResult {
    pub subscriber_id: Option<SubscriberId>,
}

impl SaveEmailResult {
    pub fn stored(&self) -> bool {
        self.subscriber_id.is_some()
    }
}

pub struct SaveEmailHandler {
    subscribers: Arc<dyn SubscriberRepository>,
}

impl SaveEmailHandler {
    pub fn new(subscribers: Arc<dyn SubscriberRepository>) -> Self {
        Self { subscribers }
    }

    pub async fn handle(&self, cmd: SaveEmailCommand) -> Result<SaveEmailResult, EmailError> {
        let email = EmailAddress::parse(&cmd.email)?;

        let mut metadata = Map::new();
        metadata.insert(
            "mbti_type".into(),
            Value::String(cmd.mbti_type.unwrap_or_else(|| UNKNOWN.to_string())),
        );
        metadata.insert(
            "superpower".into(),
            Value::String(cmd.superpower.unwrap_or_else(|| UNKNOWN.to_string())),
        );
        metadata.insert("saved_via".into(), Value::String("simple_api".into()));

        let subscriber =
            EmailSubscriber::new(email, SubscriptionSource::ResultsPage).with_metadata(metadata);

        let subscriber_id = match self.subscribers.insert(&subscriber).await {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(write = "subscriber_insert", error = %err, "Failed to save email");
                None
            }
        };

        Ok(SaveEmailResult { subscriber_id })
    }
}
