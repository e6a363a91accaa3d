//! GetDecisionHandler - Query handler for a single decision.

use std::sync::Arc;

use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{DecisionId, UserId};
use crate::ports::DecisionRepository;

use super::load_owned;

/// Query for one decision with its items.
#[derive(Debug, Clone)]
pub struct GetDecisionQuery {
    pub decision_id: DecisionId,
    pub user_id: UserId,
}

/// Handler for loading a decision.
pub struct GetDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl GetDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetDecisionQuery) -> Result<Decision, DecisionError> {
        load_owned(self.repository.as_ref(), query.decision_id, query.user_id).await
    }
}
