//! Storage Adapters
//!
//! Implementations of the SessionStore port for snapshots of in-progress
//! assessment sessions.
//!
//! ## Available Adapters
//!
//! - **FileSessionStore** - One YAML file per session key
//! - **InMemorySessionStore** - Process memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionStore, InMemorySessionStore};
//!
//! let store = FileSessionStore::new("./data/sessions");
//! let store = InMemorySessionStore::new();
//! ```

mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;

use crate::ports::SessionStoreError;

/// Keys become file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), SessionStoreError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SessionStoreError::InvalidKey(key.to_string()))
    }
}
