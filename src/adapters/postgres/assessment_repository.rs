//! PostgreSQL implementation of AssessmentRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::engagement::AssessmentRecord;
use crate::domain::foundation::{AssessmentId, DomainError};
use crate::ports::AssessmentRepository;

/// PostgreSQL implementation of the AssessmentRepository port.
pub struct PostgresAssessmentRepository {
    pool: PgPool,
}

impl PostgresAssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentRepository for PostgresAssessmentRepository {
    async fn insert(&self, record: &AssessmentRecord) -> Result<AssessmentId, DomainError> {
        let ai_analysis = serde_json::to_value(&record.analysis)
            .map_err(|e| DomainError::database(format!("Failed to encode analysis: {}", e)))?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO assessments (
                id, email, responses, mbti_type, confidence_score, superpower_title,
                superpower_data, ai_analysis, analysis_source, ip_address, user_agent,
                started_at, client_completed_at, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.email.as_ref().map(|e| e.as_str()))
        .bind(record.responses_json())
        .bind(&record.analysis.mbti_type)
        .bind(i32::try_from(record.analysis.confidence).unwrap_or(i32::MAX))
        .bind(&record.analysis.superpower_title)
        .bind(record.superpower_data())
        .bind(ai_analysis)
        .bind(record.analysis.source.as_str())
        .bind(&record.client.ip_address)
        .bind(&record.client.user_agent)
        .bind(record.started_at.map(|t| *t.as_datetime()))
        .bind(record.client_completed_at.map(|t| *t.as_datetime()))
        .bind(record.completed_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("insert assessment", e))?;

        Ok(AssessmentId::from_uuid(id))
    }
}
