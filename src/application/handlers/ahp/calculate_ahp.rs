//! CalculateAhpHandler - Command handler that runs a full AHP calculation
//! for a session and stores the outcome.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AhpConfig;
use crate::domain::ahp::{AhpError, AhpSnapshot, HierarchicalAggregator};
use crate::domain::foundation::SessionId;
use crate::ports::{AhpDataReader, AhpResultRepository, StoredAhpResult};

/// Command to (re)compute the AHP result of a session.
#[derive(Debug, Clone)]
pub struct CalculateAhpCommand {
    pub session_id: SessionId,
}

/// Result of a successful calculation.
#[derive(Debug, Clone)]
pub struct CalculateAhpResult {
    pub stored: StoredAhpResult,
    /// Groups whose consistency ratio exceeded the configured threshold.
    pub inconsistent_groups: Vec<(String, f64)>,
}

/// Handler for AHP calculations.
pub struct CalculateAhpHandler {
    reader: Arc<dyn AhpDataReader>,
    results: Arc<dyn AhpResultRepository>,
    config: AhpConfig,
}

impl CalculateAhpHandler {
    pub fn new(
        reader: Arc<dyn AhpDataReader>,
        results: Arc<dyn AhpResultRepository>,
        config: AhpConfig,
    ) -> Self {
        Self {
            reader,
            results,
            config,
        }
    }

    pub async fn handle(&self, cmd: CalculateAhpCommand) -> Result<CalculateAhpResult, AhpError> {
        let session_id = cmd.session_id;
        debug!(session_id = %session_id, "Loading AHP snapshot");

        // 1. Read everything the aggregation needs
        let snapshot = self.load_snapshot(&session_id).await?;
        info!(
            session_id = %session_id,
            criteria = snapshot.criteria.len(),
            alternatives = snapshot.alternatives.len(),
            criteria_judgments = snapshot.criteria_judgments.len(),
            alternative_judgments = snapshot.alternative_judgments.len(),
            "Starting AHP calculation"
        );

        // 2. Aggregate
        let result =
            HierarchicalAggregator::aggregate(&snapshot, &self.config.aggregation_options())?;

        // 3. Consistency is advisory unless enforcement is switched on
        let threshold = self.config.consistency_threshold;
        let inconsistent_groups: Vec<(String, f64)> = result
            .inconsistent_groups(threshold)
            .into_iter()
            .map(|(group, ratio)| (group.to_string(), ratio))
            .collect();

        for (group, ratio) in &inconsistent_groups {
            warn!(
                session_id = %session_id,
                group = %group,
                consistency_ratio = ratio,
                threshold,
                "Judgments are inconsistent"
            );
        }

        if self.config.enforce_consistency {
            if let Some((group, ratio)) = inconsistent_groups.first() {
                return Err(AhpError::ConsistencyThresholdExceeded {
                    group: group.clone(),
                    ratio: *ratio,
                    threshold,
                });
            }
        }

        // 4. Replace the stored result
        let stored = StoredAhpResult::new(session_id, result);
        self.results.upsert(&stored).await?;

        info!(
            session_id = %session_id,
            scored = stored.result.final_scores.len(),
            "AHP calculation stored"
        );

        Ok(CalculateAhpResult {
            stored,
            inconsistent_groups,
        })
    }

    async fn load_snapshot(&self, session_id: &SessionId) -> Result<AhpSnapshot, AhpError> {
        let criteria = self.reader.active_criteria().await?;
        let alternatives = self.reader.active_alternatives().await?;

        let mut criteria_judgments = self.reader.criteria_judgments(session_id, None).await?;
        let mut alternative_judgments = Vec::new();

        for criterion in &criteria {
            if criterion.is_top_level() {
                criteria_judgments.extend(
                    self.reader
                        .criteria_judgments(session_id, Some(criterion.id))
                        .await?,
                );
            } else {
                alternative_judgments.extend(
                    self.reader
                        .alternative_judgments(session_id, &criterion.id)
                        .await?,
                );
            }
        }

        Ok(AhpSnapshot {
            criteria,
            alternatives,
            criteria_judgments,
            alternative_judgments,
        })
    }
}
