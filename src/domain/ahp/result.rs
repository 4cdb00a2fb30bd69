//! Aggregated AHP outcome and its ranking helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::AlternativeId;

/// Label of the level-1 entry in `consistency_ratios`.
pub const LEVEL1_GROUP_LABEL: &str = "level1";

/// Value of `calculation_method` for results produced by this engine.
pub const CALCULATION_METHOD: &str = "geometric_mean";

/// Final output of one aggregation run.
///
/// Superseded wholesale on every recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Global weight of every scored level-2 criterion, by code.
    pub criteria_weights: BTreeMap<String, f64>,
    /// Local priority of each alternative under each level-2 criterion code.
    pub alternative_scores: BTreeMap<AlternativeId, BTreeMap<String, f64>>,
    /// Weighted sum per alternative.
    pub final_scores: BTreeMap<AlternativeId, f64>,
    /// `level1` plus one entry per parent code with at least two children.
    pub consistency_ratios: BTreeMap<String, f64>,
    pub calculation_method: String,
}

/// One row of the ranking table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// 1-based position.
    pub rank: usize,
    pub alternative_id: AlternativeId,
    pub score: f64,
}

impl AggregateResult {
    pub fn new(
        criteria_weights: BTreeMap<String, f64>,
        alternative_scores: BTreeMap<AlternativeId, BTreeMap<String, f64>>,
        final_scores: BTreeMap<AlternativeId, f64>,
        consistency_ratios: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            criteria_weights,
            alternative_scores,
            final_scores,
            consistency_ratios,
            calculation_method: CALCULATION_METHOD.to_string(),
        }
    }

    /// Alternatives by descending final score; ties broken by id.
    pub fn ranking(&self) -> Vec<RankedAlternative> {
        let mut scored: Vec<(AlternativeId, f64)> =
            self.final_scores.iter().map(|(id, s)| (*id, *s)).collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        scored
            .into_iter()
            .enumerate()
            .map(|(index, (alternative_id, score))| RankedAlternative {
                rank: index + 1,
                alternative_id,
                score,
            })
            .collect()
    }

    /// Top of the ranking, if any alternative was scored.
    pub fn best(&self) -> Option<RankedAlternative> {
        self.ranking().into_iter().next()
    }

    pub fn total_score(&self) -> f64 {
        self.final_scores.values().sum()
    }

    /// Groups whose consistency ratio exceeds `threshold`, in label order.
    pub fn inconsistent_groups(&self, threshold: f64) -> Vec<(&str, f64)> {
        self.consistency_ratios
            .iter()
            .filter(|(_, cr)| **cr > threshold)
            .map(|(label, cr)| (label.as_str(), *cr))
            .collect()
    }

    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.inconsistent_groups(threshold).is_empty()
    }
}
