//! AHP result repository port.
//!
//! Stores the latest calculation result of each session. A new result
//! replaces the previous one wholesale (last write wins, no merge).

use crate::domain::ahp::AggregateResult;
use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A calculation result as persisted for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAhpResult {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub result: AggregateResult,
    pub computed_at: Timestamp,
}

impl StoredAhpResult {
    pub fn new(session_id: SessionId, result: AggregateResult) -> Self {
        Self {
            session_id,
            result,
            computed_at: Timestamp::now(),
        }
    }
}

/// Repository port for calculation results.
#[async_trait]
pub trait AhpResultRepository: Send + Sync {
    /// Insert or replace the result for `stored.session_id`.
    ///
    /// Must be atomic: readers see either the old or the new result.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, stored: &StoredAhpResult) -> Result<(), DomainError>;

    /// Latest result for a session, if one was ever computed.
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<StoredAhpResult>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn ahp_result_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AhpResultRepository) {}
    }

    #[test]
    fn stored_result_flattens_result_fields() {
        let stored = StoredAhpResult::new(
            SessionId::new(),
            AggregateResult::new(BTreeMap::new(), BTreeMap::new(), BTreeMap::new(), BTreeMap::new()),
        );

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["calculation_method"], "geometric_mean");
        assert!(json.get("session_id").is_some());
        assert!(json.get("result").is_none());
    }
}
