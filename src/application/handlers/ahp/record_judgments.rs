//! RecordJudgmentsHandler - Command handler for recording pairwise judgments.
//!
//! Validates each judgment against the active criteria tree and the Saaty
//! range, canonicalizes it (smaller id first) and upserts the batch.

use std::sync::Arc;
use tracing::info;

use crate::domain::ahp::{AhpError, AlternativeJudgment, CriteriaHierarchy, CriteriaJudgment};
use crate::domain::foundation::{AlternativeId, SessionId};
use crate::ports::{AhpDataReader, JudgmentRepository};

/// Command to record criteria judgments of one session.
#[derive(Debug, Clone)]
pub struct RecordCriteriaJudgmentsCommand {
    pub session_id: SessionId,
    pub judgments: Vec<CriteriaJudgment>,
}

/// Command to record alternative judgments of one session.
#[derive(Debug, Clone)]
pub struct RecordAlternativeJudgmentsCommand {
    pub session_id: SessionId,
    pub judgments: Vec<AlternativeJudgment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordJudgmentsResult {
    pub recorded: usize,
}

/// Handler for both kinds of judgment writes.
pub struct RecordJudgmentsHandler {
    reader: Arc<dyn AhpDataReader>,
    repository: Arc<dyn JudgmentRepository>,
    scale_tolerance: f64,
}

impl RecordJudgmentsHandler {
    pub fn new(
        reader: Arc<dyn AhpDataReader>,
        repository: Arc<dyn JudgmentRepository>,
        scale_tolerance: f64,
    ) -> Self {
        Self {
            reader,
            repository,
            scale_tolerance,
        }
    }

    pub async fn record_criteria(
        &self,
        cmd: RecordCriteriaJudgmentsCommand,
    ) -> Result<RecordJudgmentsResult, AhpError> {
        if cmd.judgments.is_empty() {
            return Err(AhpError::validation("judgments", "at least one judgment is required"));
        }
        let hierarchy = CriteriaHierarchy::new(self.reader.active_criteria().await?)?;

        let mut canonical = Vec::with_capacity(cmd.judgments.len());
        for judgment in cmd.judgments {
            judgment.value.ensure_on_saaty_scale(self.scale_tolerance)?;
            if judgment.criterion_i == judgment.criterion_j {
                return Err(AhpError::validation(
                    "criteria_judgments",
                    format!("criterion {} compared with itself", judgment.criterion_i),
                ));
            }
            let group_ids: Vec<_> = match judgment.parent_id {
                None => hierarchy.top_level().iter().map(|c| c.id).collect(),
                Some(parent_id) => hierarchy.children_of(&parent_id).iter().map(|c| c.id).collect(),
            };
            for id in [judgment.criterion_i, judgment.criterion_j] {
                if !group_ids.contains(&id) {
                    return Err(AhpError::validation(
                        "criteria_judgments",
                        format!("criterion {} is not part of group {}", id, judgment.group()),
                    ));
                }
            }
            canonical.push(judgment.canonical());
        }

        self.repository
            .upsert_criteria_judgments(&cmd.session_id, &canonical)
            .await?;

        info!(
            session_id = %cmd.session_id,
            recorded = canonical.len(),
            "Criteria judgments recorded"
        );
        Ok(RecordJudgmentsResult {
            recorded: canonical.len(),
        })
    }

    pub async fn record_alternatives(
        &self,
        cmd: RecordAlternativeJudgmentsCommand,
    ) -> Result<RecordJudgmentsResult, AhpError> {
        if cmd.judgments.is_empty() {
            return Err(AhpError::validation("judgments", "at least one judgment is required"));
        }
        let hierarchy = CriteriaHierarchy::new(self.reader.active_criteria().await?)?;
        let alternatives: Vec<AlternativeId> = self
            .reader
            .active_alternatives()
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        let mut canonical = Vec::with_capacity(cmd.judgments.len());
        for judgment in cmd.judgments {
            judgment.value.ensure_on_saaty_scale(self.scale_tolerance)?;
            if judgment.alternative_i == judgment.alternative_j {
                return Err(AhpError::validation(
                    "alternative_judgments",
                    format!("alternative {} compared with itself", judgment.alternative_i),
                ));
            }
            if !hierarchy.is_leaf(&judgment.criterion_id) {
                return Err(AhpError::validation(
                    "alternative_judgments",
                    format!("{} is not an active level-2 criterion", judgment.criterion_id),
                ));
            }
            for id in [judgment.alternative_i, judgment.alternative_j] {
                if !alternatives.contains(&id) {
                    return Err(AhpError::validation(
                        "alternative_judgments",
                        format!("unknown alternative {}", id),
                    ));
                }
            }
            canonical.push(judgment.canonical());
        }

        self.repository
            .upsert_alternative_judgments(&cmd.session_id, &canonical)
            .await?;

        info!(
            session_id = %cmd.session_id,
            recorded = canonical.len(),
            "Alternative judgments recorded"
        );
        Ok(RecordJudgmentsResult {
            recorded: canonical.len(),
        })
    }
}
