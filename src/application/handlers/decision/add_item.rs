//! AddItemHandler - Command handler for adding a pro or con to a decision.

use std::sync::Arc;

use crate::domain::decision::{DecisionError, Item, ItemKind, NewItem};
use crate::domain::foundation::{DecisionId, Timestamp, UserId};
use crate::ports::DecisionRepository;

use super::load_owned;

/// Command to add an item.
#[derive(Debug, Clone)]
pub struct AddItemCommand {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub kind: ItemKind,
    pub text: String,
    /// Only the magnitude is used; the sign comes from `kind`.
    pub weight: i32,
}

/// Handler for adding items.
pub struct AddItemHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl AddItemHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddItemCommand) -> Result<Item, DecisionError> {
        let new_item = NewItem::new(cmd.kind, cmd.text, cmd.weight)?;
        let decision = load_owned(self.repository.as_ref(), cmd.decision_id, cmd.user_id).await?;

        let item = self
            .repository
            .add_item(decision.id(), &new_item, &Timestamp::now())
            .await?;
        Ok(item)
    }
}
