//! AHP data reader port.
//!
//! Supplies the active criteria tree, the active alternatives, and the
//! judgments recorded for a session, one comparison group at a time.
//!
//! # Design
//!
//! - **Read-only**: The engine never writes through this port
//! - **Snapshot semantics**: Callers assume the reads of one calculation see
//!   a consistent state; isolation is the implementation's concern

use crate::domain::ahp::{Alternative, AlternativeJudgment, CriteriaJudgment, Criterion};
use crate::domain::foundation::{CriterionId, DomainError, SessionId};
use async_trait::async_trait;

/// Reader port for everything an AHP calculation consumes.
#[async_trait]
pub trait AhpDataReader: Send + Sync {
    /// All active criteria of both levels.
    async fn active_criteria(&self) -> Result<Vec<Criterion>, DomainError>;

    /// All active alternatives.
    async fn active_alternatives(&self) -> Result<Vec<Alternative>, DomainError>;

    /// Criteria judgments of a session for one group.
    ///
    /// `parent_id = None` selects the level-1 group; `Some(parent)` selects
    /// the comparisons between that parent's children.
    async fn criteria_judgments(
        &self,
        session_id: &SessionId,
        parent_id: Option<CriterionId>,
    ) -> Result<Vec<CriteriaJudgment>, DomainError>;

    /// Alternative judgments of a session under one level-2 criterion.
    async fn alternative_judgments(
        &self,
        session_id: &SessionId,
        criterion_id: &CriterionId,
    ) -> Result<Vec<AlternativeJudgment>, DomainError>;
}
