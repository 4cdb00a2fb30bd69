//! GetAhpResultHandler - Query handler for the latest stored AHP result.

use std::sync::Arc;

use crate::domain::ahp::{AhpError, RankedAlternative};
use crate::domain::foundation::SessionId;
use crate::ports::{AhpResultRepository, StoredAhpResult};

/// Query for the stored result of a session.
#[derive(Debug, Clone)]
pub struct GetAhpResultQuery {
    pub session_id: SessionId,
}

/// Stored result together with its ranking.
#[derive(Debug, Clone)]
pub struct AhpResultView {
    pub stored: StoredAhpResult,
    pub ranking: Vec<RankedAlternative>,
}

/// Handler for reading stored results.
pub struct GetAhpResultHandler {
    results: Arc<dyn AhpResultRepository>,
}

impl GetAhpResultHandler {
    pub fn new(results: Arc<dyn AhpResultRepository>) -> Self {
        Self { results }
    }

    /// Returns `None` if the session was never calculated.
    pub async fn handle(&self, query: GetAhpResultQuery) -> Result<Option<AhpResultView>, AhpError> {
        let stored = self.results.find_by_session(&query.session_id).await?;
        Ok(stored.map(|stored| {
            let ranking = stored.result.ranking();
            AhpResultView { stored, ranking }
        }))
    }
}
