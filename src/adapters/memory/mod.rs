//! In-memory persistence adapters.
//!
//! Used when no database is configured and throughout the test suite.
//! Each write can be made to fail on demand so callers can observe how
//! partial persistence failures are handled.

mod engagement_store;

pub use engagement_store::{InMemoryEngagementStore, StoreWrite};
