//! PostgreSQL implementation of SubscriberRepository.
//!
//! `email_subscribers.email` carries a unique constraint; `upsert` resolves
//! conflicts on it and keeps the original row id.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::engagement::EmailSubscriber;
use crate::domain::foundation::{DomainError, SubscriberId};
use crate::ports::SubscriberRepository;

pub struct PostgresSubscriberRepository {
    pool: PgPool,
}

impl PostgresSubscriberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberRepository for PostgresSubscriberRepository {
    async fn upsert(&self, subscriber: &EmailSubscriber) -> Result<SubscriberId, DomainError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO email_subscribers (
                id, email, assessment_id, subscribed_at, status, source, metadata
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (email) DO UPDATE SET
                assessment_id = EXCLUDED.assessment_id,
                status = EXCLUDED.status,
                source = EXCLUDED.source,
                metadata = EXCLUDED.metadata
            RETURNING id
            "#,
        )
        .bind(subscriber.id.as_uuid())
        .bind(subscriber.email.as_str())
        .bind(subscriber.assessment_id.map(|id| *id.as_uuid()))
        .bind(subscriber.subscribed_at.as_datetime())
        .bind(subscriber.status.as_str())
        .bind(subscriber.source.as_str())
        .bind(Value::Object(subscriber.metadata.clone()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("upsert subscriber", e))?;

        Ok(SubscriberId::from_uuid(id))
    }

    async fn insert(&self, subscriber: &EmailSubscriber) -> Result<SubscriberId, DomainError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO email_subscribers (
                id, email, assessment_id, subscribed_at, status, source, metadata
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(subscriber.id.as_uuid())
        .bind(subscriber.email.as_str())
        .bind(subscriber.assessment_id.map(|id| *id.as_uuid()))
        .bind(subscriber.subscribed_at.as_datetime())
        .bind(subscriber.status.as_str())
        .bind(subscriber.source.as_str())
        .bind(Value::Object(subscriber.metadata.clone()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("email_subscribers_email_key") {
                    return DomainError::duplicate_email(subscriber.email.as_str());
                }
            }
            db_error("insert subscriber", e)
        })?;

        Ok(SubscriberId::from_uuid(id))
    }
}
