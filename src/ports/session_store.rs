//! Session Store Port - snapshots of in-progress assessment sessions.
//!
//! Saving happens at lifecycle boundaries (start, submit, reset); the
//! session itself stays a plain value owned by its caller.

use async_trait::async_trait;

use crate::domain::assessment::AssessmentSession;

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid session key: {0}")]
    InvalidKey(String),
}

/// Port for persisting and loading session snapshots
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Save a snapshot under `key`, replacing any previous one.
    async fn save(&self, key: &str, session: &AssessmentSession) -> Result<(), SessionStoreError>;

    /// Load the snapshot for `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<AssessmentSession>, SessionStoreError>;

    /// Remove the snapshot for `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }
}
