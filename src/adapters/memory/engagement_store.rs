//! In-memory engagement store.
//!
//! Implements all three engagement repositories over shared maps so a single
//! instance can be handed to the recorder for every write it makes.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::engagement::{AssessmentRecord, EmailSubscriber, EngagementEvent};
use crate::domain::foundation::{AssessmentId, DomainError, SubscriberId};
use crate::ports::{AnalyticsEventRepository, AssessmentRepository, SubscriberRepository};

/// The individual writes the store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreWrite {
    AssessmentInsert,
    EventInsert,
    SubscriberUpsert,
    SubscriberInsert,
}

impl StoreWrite {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreWrite::AssessmentInsert => "assessment_insert",
            StoreWrite::EventInsert => "event_insert",
            StoreWrite::SubscriberUpsert => "subscriber_upsert",
            StoreWrite::SubscriberInsert => "subscriber_insert",
        }
    }
}

/// In-memory implementation of the engagement repositories.
#[derive(Debug, Clone)]
pub struct InMemoryEngagementStore {
    assessments: Arc<RwLock<Vec<AssessmentRecord>>>,
    events: Arc<RwLock<Vec<EngagementEvent>>>,
    /// Keyed by email address.
    subscribers: Arc<RwLock<HashMap<String, EmailSubscriber>>>,
    failing: Arc<RwLock<HashSet<StoreWrite>>>,
    attempts: Arc<RwLock<HashMap<StoreWrite, usize>>>,
}

impl InMemoryEngagementStore {
    pub fn new() -> Self {
        Self {
            assessments: Arc::new(RwLock::new(Vec::new())),
            events: Arc::new(RwLock::new(Vec::new())),
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            attempts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Makes every subsequent `write` fail with a database error.
    pub async fn fail_on(&self, write: StoreWrite) {
        self.failing.write().await.insert(write);
    }

    /// Stops injecting failures for `write`.
    pub async fn recover(&self, write: StoreWrite) {
        self.failing.write().await.remove(&write);
    }

    /// Number of times `write` was attempted, failed or not.
    pub async fn attempts(&self, write: StoreWrite) -> usize {
        self.attempts.read().await.get(&write).copied().unwrap_or(0)
    }

    pub async fn assessments(&self) -> Vec<AssessmentRecord> {
        self.assessments.read().await.clone()
    }

    pub async fn events(&self) -> Vec<EngagementEvent> {
        self.events.read().await.clone()
    }

    pub async fn subscribers(&self) -> Vec<EmailSubscriber> {
        let mut all: Vec<_> = self.subscribers.read().await.values().cloned().collect();
        all.sort_by_key(|s| s.subscribed_at);
        all
    }

    pub async fn subscriber(&self, email: &str) -> Option<EmailSubscriber> {
        self.subscribers.read().await.get(email).cloned()
    }

    pub async fn assessment_count(&self) -> usize {
        self.assessments.read().await.len()
    }

    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Clears stored rows, injected failures and attempt counters.
    pub async fn clear(&self) {
        self.assessments.write().await.clear();
        self.events.write().await.clear();
        self.subscribers.write().await.clear();
        self.failing.write().await.clear();
        self.attempts.write().await.clear();
    }

    async fn attempt(&self, write: StoreWrite) -> Result<(), DomainError> {
        *self.attempts.write().await.entry(write).or_insert(0) += 1;
        if self.failing.read().await.contains(&write) {
            return Err(DomainError::database(format!(
                "injected failure for {}",
                write.as_str()
            )));
        }
        Ok(())
    }
}

impl Default for InMemoryEngagementStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryEngagementStore {
    async fn insert(&self, record: &AssessmentRecord) -> Result<AssessmentId, DomainError> {
        self.attempt(StoreWrite::AssessmentInsert).await?;
        self.assessments.write().await.push(record.clone());
        Ok(record.id)
    }
}

#[async_trait]
impl AnalyticsEventRepository for InMemoryEngagementStore {
    async fn insert(&self, event: &EngagementEvent) -> Result<(), DomainError> {
        self.attempt(StoreWrite::EventInsert).await?;
        self.events.write().await.push(event.clone());
        Ok(())
    }
}

#[async_trait]
impl SubscriberRepository for InMemoryEngagementStore {
    async fn upsert(&self, subscriber: &EmailSubscriber) -> Result<SubscriberId, DomainError> {
        self.attempt(StoreWrite::SubscriberUpsert).await?;

        let mut subscribers = self.subscribers.write().await;
        let key = subscriber.email.as_str().to_string();
        let id = subscribers.get(&key).map(|s| s.id).unwrap_or(subscriber.id);

        let mut stored = subscriber.clone();
        stored.id = id;
        subscribers.insert(key, stored);
        Ok(id)
    }

    async fn insert(&self, subscriber: &EmailSubscriber) -> Result<SubscriberId, DomainError> {
        self.attempt(StoreWrite::SubscriberInsert).await?;

        let mut subscribers = self.subscribers.write().await;
        let key = subscriber.email.as_str().to_string();
        if subscribers.contains_key(&key) {
            return Err(DomainError::duplicate_email(key));
        }
        subscribers.insert(key, subscriber.clone());
        Ok(subscriber.id)
    }
}
