//! Recommended alternative for a session.

use serde::{Deserialize, Serialize};

use super::AggregateResult;
use crate::domain::foundation::{AlternativeId, ValidationError};

/// The alternative put forward to the user, with a confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_alternative_id: AlternativeId,
    pub confidence: f64,
    pub rationale: Option<String>,
}

impl Recommendation {
    pub fn new(
        recommended_alternative_id: AlternativeId,
        confidence: f64,
        rationale: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::out_of_range("confidence", 0.0, 1.0, confidence));
        }
        Ok(Self {
            recommended_alternative_id,
            confidence,
            rationale: rationale.filter(|r| !r.trim().is_empty()),
        })
    }

    /// Recommends the top-ranked alternative of `result`.
    ///
    /// Confidence is the winner's share of the summed final scores. Returns
    /// `None` when no alternative earned any score.
    pub fn from_result(result: &AggregateResult) -> Option<Self> {
        let total = result.total_score();
        if total <= 0.0 {
            return None;
        }
        let best = result.best()?;
        let confidence = (best.score / total).clamp(0.0, 1.0);
        Some(Self {
            recommended_alternative_id: best.alternative_id,
            confidence,
            rationale: Some(format!(
                "Highest weighted score {:.4} among {} alternatives",
                best.score,
                result.final_scores.len()
            )),
        })
    }
}
