//! PostgreSQL implementation of AhpDataReader.
//!
//! Reads the active criteria tree from `ahp_criteria`, alternatives from
//! `platforms`, and session judgments from `ahp_pairwise_comparisons` and
//! `ahp_alternative_evaluations`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::ahp::{
    Alternative, AlternativeJudgment, CriteriaJudgment, Criterion, CriterionLevel, JudgmentValue,
};
use crate::domain::foundation::{AlternativeId, CriterionId, DomainError, SessionId};
use crate::ports::AhpDataReader;

/// PostgreSQL store backing every AHP port.
#[derive(Clone)]
pub struct PostgresAhpStore {
    pub(super) pool: PgPool,
}

impl PostgresAhpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CriterionRow {
    id: Uuid,
    code: String,
    name: String,
    level: i16,
    parent_id: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
struct AlternativeRow {
    id: Uuid,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct CriteriaJudgmentRow {
    parent_criteria_id: Option<Uuid>,
    criteria_i_id: Uuid,
    criteria_j_id: Uuid,
    comparison_value: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct AlternativeJudgmentRow {
    criteria_id: Uuid,
    alternative_i_id: Uuid,
    alternative_j_id: Uuid,
    comparison_value: f64,
}

#[async_trait]
impl AhpDataReader for PostgresAhpStore {
    async fn active_criteria(&self) -> Result<Vec<Criterion>, DomainError> {
        let rows: Vec<CriterionRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, level::int2 AS level, parent_id
            FROM ahp_criteria
            WHERE active = true
            ORDER BY level, code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch criteria: {}", e)))?;

        rows.into_iter().map(row_to_criterion).collect()
    }

    async fn active_alternatives(&self) -> Result<Vec<Alternative>, DomainError> {
        let rows: Vec<AlternativeRow> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM platforms
            WHERE active = true
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch platforms: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                Alternative::new(AlternativeId::from_uuid(row.id), row.name)
                    .map_err(|e| corrupt_row("platforms", row.id, e))
            })
            .collect()
    }

    async fn criteria_judgments(
        &self,
        session_id: &SessionId,
        parent_id: Option<CriterionId>,
    ) -> Result<Vec<CriteriaJudgment>, DomainError> {
        let level: i16 = if parent_id.is_none() {
            CriterionLevel::Top.as_i16()
        } else {
            CriterionLevel::Sub.as_i16()
        };

        let rows: Vec<CriteriaJudgmentRow> = sqlx::query_as(
            r#"
            SELECT parent_criteria_id, criteria_i_id, criteria_j_id,
                   comparison_value::float8 AS comparison_value
            FROM ahp_pairwise_comparisons
            WHERE session_id = $1
              AND criteria_level = $2
              AND parent_criteria_id IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(level)
        .bind(parent_id.map(|id| *id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch criteria comparisons: {}", e)))?;

        rows.into_iter()
            .map(|row| -> Result<CriteriaJudgment, DomainError> {
                let value = JudgmentValue::new(row.comparison_value)
                    .map_err(|e| corrupt_row("ahp_pairwise_comparisons", row.criteria_i_id, e))?;
                Ok(CriteriaJudgment::new(
                    row.parent_criteria_id.map(CriterionId::from_uuid),
                    CriterionId::from_uuid(row.criteria_i_id),
                    CriterionId::from_uuid(row.criteria_j_id),
                    value,
                ))
            })
            .collect()
    }

    async fn alternative_judgments(
        &self,
        session_id: &SessionId,
        criterion_id: &CriterionId,
    ) -> Result<Vec<AlternativeJudgment>, DomainError> {
        let rows: Vec<AlternativeJudgmentRow> = sqlx::query_as(
            r#"
            SELECT criteria_id, alternative_i_id, alternative_j_id,
                   comparison_value::float8 AS comparison_value
            FROM ahp_alternative_evaluations
            WHERE session_id = $1 AND criteria_id = $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(criterion_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to fetch alternative evaluations: {}", e))
        })?;

        rows.into_iter()
            .map(|row| -> Result<AlternativeJudgment, DomainError> {
                let value = JudgmentValue::new(row.comparison_value).map_err(|e| {
                    corrupt_row("ahp_alternative_evaluations", row.alternative_i_id, e)
                })?;
                Ok(AlternativeJudgment::new(
                    CriterionId::from_uuid(row.criteria_id),
                    AlternativeId::from_uuid(row.alternative_i_id),
                    AlternativeId::from_uuid(row.alternative_j_id),
                    value,
                ))
            })
            .collect()
    }
}

fn row_to_criterion(row: CriterionRow) -> Result<Criterion, DomainError> {
    let id = CriterionId::from_uuid(row.id);
    let level = CriterionLevel::try_from(row.level)
        .map_err(|e| corrupt_row("ahp_criteria", row.id, e))?;

    let criterion = match (level, row.parent_id) {
        (CriterionLevel::Top, None) => Criterion::top(id, row.code, row.name),
        (CriterionLevel::Top, Some(_)) => {
            return Err(corrupt_row(
                "ahp_criteria",
                row.id,
                "level-1 criterion with parent",
            ))
        }
        (CriterionLevel::Sub, Some(parent)) => {
            Criterion::sub(id, row.code, row.name, CriterionId::from_uuid(parent))
        }
        (CriterionLevel::Sub, None) => {
            return Err(corrupt_row(
                "ahp_criteria",
                row.id,
                "level-2 criterion without parent",
            ))
        }
    };
    criterion.map_err(|e| corrupt_row("ahp_criteria", row.id, e))
}

fn corrupt_row(table: &str, id: Uuid, reason: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid row {} in {}: {}", id, table, reason))
        .with_detail("table", table)
}
