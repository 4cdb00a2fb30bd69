//! In-memory AHP store for tests and local development.
//!
//! Implements every AHP port over plain collections guarded by async locks.
//! Reads can be made to fail on demand to exercise error propagation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::ahp::{
    AhpSnapshot, Alternative, AlternativeJudgment, CriteriaJudgment, Criterion,
};
use crate::domain::foundation::{CriterionId, DomainError, SessionId};
use crate::ports::{
    AhpDataReader, AhpResultRepository, JudgmentRepository, RecommendationRepository,
    StoredAhpResult, StoredRecommendation,
};

/// In-memory implementation of the AHP ports.
///
/// Criteria and alternatives are global reference data; judgments, results
/// and recommendations are kept per session.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(
///     InMemoryAhpStore::new()
///         .with_criteria(criteria)
///         .with_alternatives(alternatives),
/// );
/// let handler = CalculateAhpHandler::new(store.clone(), store.clone(), config);
/// ```
#[derive(Default)]
pub struct InMemoryAhpStore {
    criteria: RwLock<Vec<Criterion>>,
    alternatives: RwLock<Vec<Alternative>>,
    criteria_judgments: RwLock<HashMap<SessionId, Vec<CriteriaJudgment>>>,
    alternative_judgments: RwLock<HashMap<SessionId, Vec<AlternativeJudgment>>>,
    results: RwLock<HashMap<SessionId, StoredAhpResult>>,
    recommendations: RwLock<HashMap<SessionId, StoredRecommendation>>,
    fail_reads: AtomicBool,
}

impl InMemoryAhpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the active criteria.
    pub fn with_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        *self.criteria.get_mut() = criteria;
        self
    }

    /// Seeds the active alternatives.
    pub fn with_alternatives(mut self, alternatives: Vec<Alternative>) -> Self {
        *self.alternatives.get_mut() = alternatives;
        self
    }

    /// Seeds the store from a snapshot, filing its judgments under `session_id`.
    pub fn from_snapshot(session_id: SessionId, snapshot: AhpSnapshot) -> Self {
        let mut store = Self::new()
            .with_criteria(snapshot.criteria)
            .with_alternatives(snapshot.alternatives);
        store.criteria_judgments.get_mut().insert(
            session_id,
            snapshot
                .criteria_judgments
                .into_iter()
                .map(CriteriaJudgment::canonical)
                .collect(),
        );
        store.alternative_judgments.get_mut().insert(
            session_id,
            snapshot
                .alternative_judgments
                .into_iter()
                .map(AlternativeJudgment::canonical)
                .collect(),
        );
        store
    }

    // === Test Helpers ===

    /// Makes every subsequent read fail with a database error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of stored criteria judgments for a session.
    pub async fn criteria_judgment_count(&self, session_id: &SessionId) -> usize {
        self.criteria_judgments
            .read()
            .await
            .get(session_id)
            .map_or(0, Vec::len)
    }

    /// Number of stored alternative judgments for a session.
    pub async fn alternative_judgment_count(&self, session_id: &SessionId) -> usize {
        self.alternative_judgments
            .read()
            .await
            .get(session_id)
            .map_or(0, Vec::len)
    }

    fn check_reads(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::database("Simulated read failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl AhpDataReader for InMemoryAhpStore {
    async fn active_criteria(&self) -> Result<Vec<Criterion>, DomainError> {
        self.check_reads()?;
        Ok(self.criteria.read().await.clone())
    }

    async fn active_alternatives(&self) -> Result<Vec<Alternative>, DomainError> {
        self.check_reads()?;
        Ok(self.alternatives.read().await.clone())
    }

    async fn criteria_judgments(
        &self,
        session_id: &SessionId,
        parent_id: Option<CriterionId>,
    ) -> Result<Vec<CriteriaJudgment>, DomainError> {
        self.check_reads()?;
        Ok(self
            .criteria_judgments
            .read()
            .await
            .get(session_id)
            .map(|all| {
                all.iter()
                    .filter(|j| j.parent_id == parent_id)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn alternative_judgments(
        &self,
        session_id: &SessionId,
        criterion_id: &CriterionId,
    ) -> Result<Vec<AlternativeJudgment>, DomainError> {
        self.check_reads()?;
        Ok(self
            .alternative_judgments
            .read()
            .await
            .get(session_id)
            .map(|all| {
                all.iter()
                    .filter(|j| &j.criterion_id == criterion_id)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl JudgmentRepository for InMemoryAhpStore {
    async fn upsert_criteria_judgments(
        &self,
        session_id: &SessionId,
        judgments: &[CriteriaJudgment],
    ) -> Result<(), DomainError> {
        let mut all = self.criteria_judgments.write().await;
        let stored = all.entry(*session_id).or_default();
        for judgment in judgments.iter().map(|j| j.canonical()) {
            match stored.iter_mut().find(|s| {
                s.parent_id == judgment.parent_id
                    && s.criterion_i == judgment.criterion_i
                    && s.criterion_j == judgment.criterion_j
            }) {
                Some(existing) => existing.value = judgment.value,
                None => stored.push(judgment),
            }
        }
        Ok(())
    }

    async fn upsert_alternative_judgments(
        &self,
        session_id: &SessionId,
        judgments: &[AlternativeJudgment],
    ) -> Result<(), DomainError> {
        let mut all = self.alternative_judgments.write().await;
        let stored = all.entry(*session_id).or_default();
        for judgment in judgments.iter().map(|j| j.canonical()) {
            match stored.iter_mut().find(|s| {
                s.criterion_id == judgment.criterion_id
                    && s.alternative_i == judgment.alternative_i
                    && s.alternative_j == judgment.alternative_j
            }) {
                Some(existing) => existing.value = judgment.value,
                None => stored.push(judgment),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AhpResultRepository for InMemoryAhpStore {
    async fn upsert(&self, stored: &StoredAhpResult) -> Result<(), DomainError> {
        self.results
            .write()
            .await
            .insert(stored.session_id, stored.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<StoredAhpResult>, DomainError> {
        self.check_reads()?;
        Ok(self.results.read().await.get(session_id).cloned())
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryAhpStore {
    async fn upsert(&self, stored: &StoredRecommendation) -> Result<(), DomainError> {
        self.recommendations
            .write()
            .await
            .insert(stored.session_id, stored.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<StoredRecommendation>, DomainError> {
        self.check_reads()?;
        Ok(self.recommendations.read().await.get(session_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::{JudgmentValue, Recommendation};
    use crate::domain::foundation::{AlternativeId, ErrorCode};
    use std::collections::BTreeMap;

    fn v(value: f64) -> JudgmentValue {
        JudgmentValue::new(value).unwrap()
    }

    fn ordered_criteria() -> (CriterionId, CriterionId) {
        let a = CriterionId::new();
        let b = CriterionId::new();
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    #[tokio::test]
    async fn upsert_replaces_reverse_direction() {
        let store = InMemoryAhpStore::new();
        let session = SessionId::new();
        let (small, large) = ordered_criteria();

        store
            .upsert_criteria_judgments(&session, &[CriteriaJudgment::new(None, small, large, v(3.0))])
            .await
            .unwrap();
        store
            .upsert_criteria_judgments(&session, &[CriteriaJudgment::new(None, large, small, v(2.0))])
            .await
            .unwrap();

        let stored = store.criteria_judgments(&session, None).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].criterion_i, small);
        assert!((stored[0].value.value() - 0.5).abs() < 1e-12);
    }

    #[tokio::test]
    async fn criteria_judgments_filter_by_parent() {
        let store = InMemoryAhpStore::new();
        let session = SessionId::new();
        let parent = CriterionId::new();
        let (a, b) = ordered_criteria();

        store
            .upsert_criteria_judgments(
                &session,
                &[
                    CriteriaJudgment::new(None, a, b, v(3.0)),
                    CriteriaJudgment::new(Some(parent), a, b, v(5.0)),
                ],
            )
            .await
            .unwrap();

        assert_eq!(store.criteria_judgments(&session, None).await.unwrap().len(), 1);
        let children = store.criteria_judgments(&session, Some(parent)).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].value.value(), 5.0);
        assert!(store
            .criteria_judgments(&SessionId::new(), None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn alternative_judgments_filter_by_criterion() {
        let store = InMemoryAhpStore::new();
        let session = SessionId::new();
        let criterion = CriterionId::new();

        store
            .upsert_alternative_judgments(
                &session,
                &[AlternativeJudgment::new(
                    criterion,
                    AlternativeId::new(),
                    AlternativeId::new(),
                    v(2.0),
                )],
            )
            .await
            .unwrap();

        assert_eq!(store.alternative_judgment_count(&session).await, 1);
        assert_eq!(
            store
                .alternative_judgments(&session, &criterion)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(store
            .alternative_judgments(&session, &CriterionId::new())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn result_upsert_is_last_write_wins() {
        let store = InMemoryAhpStore::new();
        let session = SessionId::new();
        let empty = || BTreeMap::new();

        let first = StoredAhpResult::new(
            session,
            crate::domain::ahp::AggregateResult::new(empty(), BTreeMap::new(), BTreeMap::new(), empty()),
        );
        let mut second = first.clone();
        second.result.criteria_weights.insert("C1".to_string(), 1.0);

        AhpResultRepository::upsert(&store, &first).await.unwrap();
        AhpResultRepository::upsert(&store, &second).await.unwrap();

        let found = AhpResultRepository::find_by_session(&store, &session)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, second);
    }

    #[tokio::test]
    async fn recommendation_round_trips() {
        let store = InMemoryAhpStore::new();
        let session = SessionId::new();
        let rec = Recommendation::new(AlternativeId::new(), 0.8, None).unwrap();

        RecommendationRepository::upsert(&store, &StoredRecommendation::new(session, rec.clone()))
            .await
            .unwrap();

        let found = RecommendationRepository::find_by_session(&store, &session)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.recommendation, rec);
    }

    #[tokio::test]
    async fn failing_reads_surface_database_error() {
        let store = InMemoryAhpStore::new();
        store.set_fail_reads(true);

        let err = store.active_criteria().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        store.set_fail_reads(false);
        assert!(store.active_criteria().await.is_ok());
    }
}
