//! PostgreSQL implementation of JudgmentRepository.
//!
//! Each judgment replaces any stored row for the same group and unordered
//! pair, in either orientation, inside one transaction per batch.

use async_trait::async_trait;

use super::PostgresAhpStore;
use crate::domain::ahp::{AlternativeJudgment, CriteriaJudgment, CriterionLevel};
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::JudgmentRepository;

fn write_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", context, e))
}

#[async_trait]
impl JudgmentRepository for PostgresAhpStore {
    async fn upsert_criteria_judgments(
        &self,
        session_id: &SessionId,
        judgments: &[CriteriaJudgment],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| write_error("begin transaction", e))?;

        for judgment in judgments.iter().map(|j| j.canonical()) {
            let level = match judgment.parent_id {
                None => CriterionLevel::Top,
                Some(_) => CriterionLevel::Sub,
            };
            let parent = judgment.parent_id.map(|id| *id.as_uuid());

            sqlx::query(
                r#"
                DELETE FROM ahp_pairwise_comparisons
                WHERE session_id = $1
                  AND criteria_level = $2
                  AND parent_criteria_id IS NOT DISTINCT FROM $3
                  AND ((criteria_i_id = $4 AND criteria_j_id = $5)
                    OR (criteria_i_id = $5 AND criteria_j_id = $4))
                "#,
            )
            .bind(session_id.as_uuid())
            .bind(level.as_i16())
            .bind(parent)
            .bind(judgment.criterion_i.as_uuid())
            .bind(judgment.criterion_j.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error("replace criteria comparison", e))?;

            sqlx::query(
                r#"
                INSERT INTO ahp_pairwise_comparisons (
                    session_id, criteria_level, parent_criteria_id,
                    criteria_i_id, criteria_j_id, comparison_value
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(session_id.as_uuid())
            .bind(level.as_i16())
            .bind(parent)
            .bind(judgment.criterion_i.as_uuid())
            .bind(judgment.criterion_j.as_uuid())
            .bind(judgment.value.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error("insert criteria comparison", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| write_error("commit criteria comparisons", e))
    }

    async fn upsert_alternative_judgments(
        &self,
        session_id: &SessionId,
        judgments: &[AlternativeJudgment],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| write_error("begin transaction", e))?;

        for judgment in judgments.iter().map(|j| j.canonical()) {
            sqlx::query(
                r#"
                DELETE FROM ahp_alternative_evaluations
                WHERE session_id = $1
                  AND criteria_id = $2
                  AND ((alternative_i_id = $3 AND alternative_j_id = $4)
                    OR (alternative_i_id = $4 AND alternative_j_id = $3))
                "#,
            )
            .bind(session_id.as_uuid())
            .bind(judgment.criterion_id.as_uuid())
            .bind(judgment.alternative_i.as_uuid())
            .bind(judgment.alternative_j.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error("replace alternative evaluation", e))?;

            sqlx::query(
                r#"
                INSERT INTO ahp_alternative_evaluations (
                    session_id, criteria_id, alternative_i_id, alternative_j_id, comparison_value
                ) VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(session_id.as_uuid())
            .bind(judgment.criterion_id.as_uuid())
            .bind(judgment.alternative_i.as_uuid())
            .bind(judgment.alternative_j.as_uuid())
            .bind(judgment.value.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error("insert alternative evaluation", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| write_error("commit alternative evaluations", e))
    }
}
