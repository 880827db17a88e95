//! Assessment record persistence port.

use async_trait::async_trait;

use crate::domain::engagement::AssessmentRecord;
use crate::domain::foundation::{AssessmentId, DomainError};

/// Write-only store for analyzed assessments.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Inserts a record and returns its stored id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, record: &AssessmentRecord) -> Result<AssessmentId, DomainError>;
}
