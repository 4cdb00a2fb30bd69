//! SaveRecommendationHandler - Command handler for a session's recommendation.

use std::sync::Arc;
use tracing::info;

use crate::domain::ahp::{AhpError, Recommendation};
use crate::domain::foundation::SessionId;
use crate::ports::{AhpResultRepository, RecommendationRepository, StoredRecommendation};

/// Command to save a recommendation.
///
/// With `recommendation = None` the top-ranked alternative of the stored
/// result is recommended.
#[derive(Debug, Clone)]
pub struct SaveRecommendationCommand {
    pub session_id: SessionId,
    pub recommendation: Option<Recommendation>,
}

/// Handler for saving recommendations.
pub struct SaveRecommendationHandler {
    results: Arc<dyn AhpResultRepository>,
    recommendations: Arc<dyn RecommendationRepository>,
}

impl SaveRecommendationHandler {
    pub fn new(
        results: Arc<dyn AhpResultRepository>,
        recommendations: Arc<dyn RecommendationRepository>,
    ) -> Self {
        Self {
            results,
            recommendations,
        }
    }

    pub async fn handle(
        &self,
        cmd: SaveRecommendationCommand,
    ) -> Result<StoredRecommendation, AhpError> {
        let result = self
            .results
            .find_by_session(&cmd.session_id)
            .await?
            .map(|stored| stored.result);

        let recommendation = match (cmd.recommendation, result) {
            (Some(explicit), Some(result)) => {
                if !result
                    .final_scores
                    .contains_key(&explicit.recommended_alternative_id)
                {
                    return Err(AhpError::validation(
                        "recommended_alternative_id",
                        format!(
                            "alternative {} was not scored in the latest calculation",
                            explicit.recommended_alternative_id
                        ),
                    ));
                }
                explicit
            }
            (Some(explicit), None) => explicit,
            (None, Some(result)) => Recommendation::from_result(&result).ok_or_else(|| {
                AhpError::insufficient("no alternative earned a positive score")
            })?,
            (None, None) => {
                return Err(AhpError::insufficient(
                    "session has no AHP result to derive a recommendation from",
                ))
            }
        };

        let stored = StoredRecommendation::new(cmd.session_id, recommendation);
        self.recommendations.upsert(&stored).await?;

        info!(
            session_id = %cmd.session_id,
            alternative_id = %stored.recommendation.recommended_alternative_id,
            confidence = stored.recommendation.confidence,
            "Recommendation saved"
        );
        Ok(stored)
    }
}
