//! DeleteItemHandler - Command handler for removing an item.

use std::sync::Arc;

use crate::domain::decision::DecisionError;
use crate::domain::foundation::{ItemId, Timestamp, UserId};
use crate::ports::DecisionRepository;

use super::load_owned;

/// Command to delete an item.
#[derive(Debug, Clone)]
pub struct DeleteItemCommand {
    pub item_id: ItemId,
    pub user_id: UserId,
}

/// Handler for deleting items.
pub struct DeleteItemHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl DeleteItemHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteItemCommand) -> Result<(), DecisionError> {
        let item = self
            .repository
            .find_item(cmd.item_id)
            .await?
            .ok_or_else(|| DecisionError::item_not_found(cmd.item_id))?;
        load_owned(self.repository.as_ref(), item.decision_id(), cmd.user_id).await?;

        self.repository
            .delete_item(item.id(), &Timestamp::now())
            .await?;
        Ok(())
    }
}
