//! DeleteDecisionHandler - Command handler for permanently removing decisions.

use std::sync::Arc;

use crate::domain::decision::DecisionError;
use crate::domain::foundation::{DecisionId, UserId};
use crate::ports::DecisionRepository;

use super::load_owned;

/// Command to delete a decision and its items.
#[derive(Debug, Clone)]
pub struct DeleteDecisionCommand {
    pub decision_id: DecisionId,
    pub user_id: UserId,
}

/// Handler for deleting decisions.
pub struct DeleteDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl DeleteDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteDecisionCommand) -> Result<(), DecisionError> {
        let decision = load_owned(self.repository.as_ref(), cmd.decision_id, cmd.user_id).await?;
        self.repository.delete(decision.id()).await?;
        tracing::info!(
            decision_id = %decision.id(),
            user_id = %cmd.user_id,
            items = decision.items().len(),
            "Decision deleted"
        );
        Ok(())
    }
}
