//! Recommendation repository port.
//!
//! One recommendation per session; saving again replaces it.

use crate::domain::ahp::Recommendation;
use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A recommendation as persisted for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecommendation {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub updated_at: Timestamp,
}

impl StoredRecommendation {
    pub fn new(session_id: SessionId, recommendation: Recommendation) -> Self {
        Self {
            session_id,
            recommendation,
            updated_at: Timestamp::now(),
        }
    }
}

/// Repository port for session recommendations.
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Insert or replace the recommendation for `stored.session_id`.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, stored: &StoredRecommendation) -> Result<(), DomainError>;

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<StoredRecommendation>, DomainError>;
}
