//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAssessmentRepository` - Analyzed assessment records
//! - `PostgresAnalyticsEventRepository` - Engagement events
//! - `PostgresSubscriberRepository` - Email subscribers, unique by email
//!
//! The schema lives in `migrations/` at the crate root.

mod analytics_event_repository;
mod assessment_repository;
mod subscriber_repository;

pub use analytics_event_repository::PostgresAnalyticsEventRepository;
pub use assessment_repository::PostgresAssessmentRepository;
pub use subscriber_repository::PostgresSubscriberRepository;

use crate::domain::foundation::DomainError;

/// Wraps an sqlx failure as a database error naming the operation.
fn db_error(operation: &str, err: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", operation, err))
}
