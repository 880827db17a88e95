//! File-based Session Store Adapter
//!
//! Stores one YAML snapshot per session key under a base directory, so a
//! paused assessment survives process restarts and stays readable on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::validate_key;
use crate::domain::assessment::AssessmentSession;
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for session snapshots
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`.
    ///
    /// The directory is created on first save.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_file_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.yaml", key))
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, key: &str, session: &AssessmentSession) -> Result<(), SessionStoreError> {
        validate_key(key)?;
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.session_file_path(key), yaml)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }

    async fn load(&self, key: &str) -> Result<Option<AssessmentSession>, SessionStoreError> {
        validate_key(key)?;
        let file_path = self.session_file_path(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        let session = serde_yaml::from_str(&yaml)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(session))
    }

    async fn delete(&self, key: &str) -> Result<(), SessionStoreError> {
        validate_key(key)?;
        let file_path = self.session_file_path(key);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}
