//! Analytics event persistence port.

use async_trait::async_trait;

use crate::domain::engagement::EngagementEvent;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait AnalyticsEventRepository: Send + Sync {
    /// Appends an event.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, event: &EngagementEvent) -> Result<(), DomainError>;
}
