//! CreateDecisionHandler - Command handler for creating decisions.

use std::sync::Arc;

use crate::domain::decision::{Decision, DecisionError, NewDecision};
use crate::domain::foundation::UserId;
use crate::ports::DecisionRepository;

/// Command to create a decision.
#[derive(Debug, Clone)]
pub struct CreateDecisionCommand {
    pub user_id: UserId,
    /// Blank or absent titles become "New Decision".
    pub title: Option<String>,
}

/// Handler for creating decisions.
pub struct CreateDecisionHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl CreateDecisionHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateDecisionCommand) -> Result<Decision, DecisionError> {
        let new = NewDecision::new(cmd.user_id, cmd.title)?;
        let decision = self.repository.create(&new).await?;
        Ok(decision)
    }
}
