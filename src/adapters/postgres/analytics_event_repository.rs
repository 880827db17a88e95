//! PostgreSQL implementation of AnalyticsEventRepository.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::db_error;
use crate::domain::engagement::EngagementEvent;
use crate::domain::foundation::DomainError;
use crate::ports::AnalyticsEventRepository;

pub struct PostgresAnalyticsEventRepository {
    pool: PgPool,
}

impl PostgresAnalyticsEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsEventRepository for PostgresAnalyticsEventRepository {
    async fn insert(&self, event: &EngagementEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO analytics_events (
                id, assessment_id, event_type, event_data, user_agent, ip_address, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.assessment_id.map(|id| *id.as_uuid()))
        .bind(&event.event_type)
        .bind(Value::Object(event.payload.clone()))
        .bind(&event.client.user_agent)
        .bind(&event.client.ip_address)
        .bind(event.occurred_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert analytics event", e))?;

        Ok(())
    }
}
