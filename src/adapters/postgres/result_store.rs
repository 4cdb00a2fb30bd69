//! PostgreSQL implementations of AhpResultRepository and
//! RecommendationRepository.
//!
//! Both tables hold one row per session (`ON CONFLICT (session_id)`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::PostgresAhpStore;
use crate::domain::ahp::{AggregateResult, Recommendation};
use crate::domain::foundation::{AlternativeId, DomainError, SessionId, Timestamp};
use crate::ports::{
    AhpResultRepository, RecommendationRepository, StoredAhpResult, StoredRecommendation,
};

#[derive(Debug, sqlx::FromRow)]
struct AhpResultRow {
    session_id: Uuid,
    criteria_weights: Json<BTreeMap<String, f64>>,
    alternative_scores: Json<BTreeMap<AlternativeId, BTreeMap<String, f64>>>,
    final_scores: Json<BTreeMap<AlternativeId, f64>>,
    consistency_ratios: Json<BTreeMap<String, f64>>,
    calculation_method: String,
    updated_at: DateTime<Utc>,
}

impl From<AhpResultRow> for StoredAhpResult {
    fn from(row: AhpResultRow) -> Self {
        StoredAhpResult {
            session_id: SessionId::from_uuid(row.session_id),
            result: AggregateResult {
                criteria_weights: row.criteria_weights.0,
                alternative_scores: row.alternative_scores.0,
                final_scores: row.final_scores.0,
                consistency_ratios: row.consistency_ratios.0,
                calculation_method: row.calculation_method,
            },
            computed_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecommendationRow {
    session_id: Uuid,
    recommended_platform_id: Uuid,
    confidence: f64,
    rationale: Option<String>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl AhpResultRepository for PostgresAhpStore {
    async fn upsert(&self, stored: &StoredAhpResult) -> Result<(), DomainError> {
        let result = &stored.result;
        sqlx::query(
            r#"
            INSERT INTO ahp_results (
                session_id, criteria_weights, alternative_scores, final_scores,
                consistency_ratios, calculation_method, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (session_id) DO UPDATE SET
                criteria_weights = EXCLUDED.criteria_weights,
                alternative_scores = EXCLUDED.alternative_scores,
                final_scores = EXCLUDED.final_scores,
                consistency_ratios = EXCLUDED.consistency_ratios,
                calculation_method = EXCLUDED.calculation_method,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(stored.session_id.as_uuid())
        .bind(Json(&result.criteria_weights))
        .bind(Json(&result.alternative_scores))
        .bind(Json(&result.final_scores))
        .bind(Json(&result.consistency_ratios))
        .bind(&result.calculation_method)
        .bind(stored.computed_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert AHP result: {}", e)))?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<StoredAhpResult>, DomainError> {
        let row: Option<AhpResultRow> = sqlx::query_as(
            r#"
            SELECT session_id, criteria_weights, alternative_scores, final_scores,
                   consistency_ratios, calculation_method, updated_at
            FROM ahp_results
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch AHP result: {}", e)))?;

        Ok(row.map(StoredAhpResult::from))
    }
}

#[async_trait]
impl RecommendationRepository for PostgresAhpStore {
    async fn upsert(&self, stored: &StoredRecommendation) -> Result<(), DomainError> {
        let recommendation = &stored.recommendation;
        sqlx::query(
            r#"
            INSERT INTO recommendations (
                session_id, recommended_platform_id, confidence, rationale, updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (session_id) DO UPDATE SET
                recommended_platform_id = EXCLUDED.recommended_platform_id,
                confidence = EXCLUDED.confidence,
                rationale = EXCLUDED.rationale,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(stored.session_id.as_uuid())
        .bind(recommendation.recommended_alternative_id.as_uuid())
        .bind(recommendation.confidence)
        .bind(recommendation.rationale.as_deref())
        .bind(stored.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert recommendation: {}", e)))?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<StoredRecommendation>, DomainError> {
        let row: Option<RecommendationRow> = sqlx::query_as(
            r#"
            SELECT session_id, recommended_platform_id, confidence::float8 AS confidence,
                   rationale, updated_at
            FROM recommendations
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch recommendation: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let recommendation = Recommendation::new(
            AlternativeId::from_uuid(row.recommended_platform_id),
            row.confidence,
            row.rationale,
        )
        .map_err(|e| {
            DomainError::database(format!(
                "Invalid recommendation for session {}: {}",
                row.session_id, e
            ))
        })?;

        Ok(Some(StoredRecommendation {
            session_id: SessionId::from_uuid(row.session_id),
            recommendation,
            updated_at: Timestamp::from_datetime(row.updated_at),
        }))
    }
}
