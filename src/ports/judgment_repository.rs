//! Judgment repository port (write side).
//!
//! Persists pairwise judgments for a session. Judgments arrive already
//! canonicalized (smaller id first), so one stored row per unordered pair
//! and group is enough.

use crate::domain::ahp::{AlternativeJudgment, CriteriaJudgment};
use crate::domain::foundation::{DomainError, SessionId};
use async_trait::async_trait;

/// Repository port for recording pairwise judgments.
///
/// Upserts replace the value of an existing judgment for the same group and
/// pair; they never create a second row for the reverse direction.
#[async_trait]
pub trait JudgmentRepository: Send + Sync {
    /// Insert or replace criteria judgments.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert_criteria_judgments(
        &self,
        session_id: &SessionId,
        judgments: &[CriteriaJudgment],
    ) -> Result<(), DomainError>;

    /// Insert or replace alternative judgments.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert_alternative_judgments(
        &self,
        session_id: &SessionId,
        judgments: &[AlternativeJudgment],
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judgment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn JudgmentRepository) {}
    }
}
