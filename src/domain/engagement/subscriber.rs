//! Email subscribers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::foundation::{AssessmentId, SubscriberId, Timestamp};

use super::EmailAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriberStatus {
    #[default]
    Active,
    Unsubscribed,
}

impl SubscriberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriberStatus::Active => "active",
            SubscriberStatus::Unsubscribed => "unsubscribed",
        }
    }
}

/// Where a subscription came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionSource {
    AssessmentCompletion,
    Direct,
    ResultsPage,
    Other(String),
}

impl SubscriptionSource {
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionSource::AssessmentCompletion => "assessment_completion",
            SubscriptionSource::Direct => "direct",
            SubscriptionSource::ResultsPage => "results_page",
            SubscriptionSource::Other(s) => s,
        }
    }
}

impl From<String> for SubscriptionSource {
    fn from(value: String) -> Self {
        match value.as_str() {
            "assessment_completion" => SubscriptionSource::AssessmentCompletion,
            "direct" => SubscriptionSource::Direct,
            "results_page" => SubscriptionSource::ResultsPage,
            _ => SubscriptionSource::Other(value),
        }
    }
}

impl From<SubscriptionSource> for String {
    fn from(value: SubscriptionSource) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SubscriptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opted-in email address. Unique by email in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSubscriber {
    pub id: SubscriberId,
    pub email: EmailAddress,
    pub assessment_id: Option<AssessmentId>,
    pub status: SubscriberStatus,
    pub source: SubscriptionSource,
    pub metadata: Map<String, Value>,
    pub subscribed_at: Timestamp,
}

impl EmailSubscriber {
    pub fn new(email: EmailAddress, source: SubscriptionSource) -> Self {
        Self {
            id: SubscriberId::new(),
            email,
            assessment_id: None,
            status: SubscriberStatus::Active,
            source,
            metadata: Map::new(),
            subscribed_at: Timestamp::now(),
        }
    }

    pub fn with_assessment(mut self, assessment_id: Option<AssessmentId>) -> Self {
        self.assessment_id = assessment_id;
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}
