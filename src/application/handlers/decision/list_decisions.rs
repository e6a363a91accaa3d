//! ListDecisionsHandler - Query handler for a user's decisions.

use std::sync::Arc;

use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::UserId;
use crate::ports::DecisionRepository;

/// Query for every decision a user owns.
#[derive(Debug, Clone)]
pub struct ListDecisionsQuery {
    pub user_id: UserId,
}

/// Decisions split by archive state, most recently updated first.
#[derive(Debug, Clone, Default)]
pub struct DecisionLists {
    pub active: Vec<Decision>,
    pub archived: Vec<Decision>,
}

/// Handler for listing decisions.
pub struct ListDecisionsHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl ListDecisionsHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListDecisionsQuery) -> Result<DecisionLists, DecisionError> {
        let decisions = self.repository.find_by_user(query.user_id).await?;
        let (archived, active): (Vec<_>, Vec<_>) = decisions.into_iter().partition(Decision::is_archived);
        Ok(DecisionLists { active, archived })
    }
}
