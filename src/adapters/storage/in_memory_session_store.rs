//! In-memory SessionStore implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::validate_key;
use crate::domain::assessment::AssessmentSession;
use crate::ports::{SessionStore, SessionStoreError};

/// Keeps session snapshots in a shared map.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, AssessmentSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, key: &str, session: &AssessmentSession) -> Result<(), SessionStoreError> {
        validate_key(key)?;
        self.sessions
            .write()
            .await
            .insert(key.to_string(), session.clone());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<AssessmentSession>, SessionStoreError> {
        validate_key(key)?;
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), SessionStoreError> {
        validate_key(key)?;
        self.sessions.write().await.remove(key);
        Ok(())
    }
}
