//! UpdateItemHandler - Command handler for editing an item's text or weight.

use std::sync::Arc;

use crate::domain::decision::{DecisionError, Item};
use crate::domain::foundation::{ItemId, Timestamp, UserId};
use crate::ports::DecisionRepository;

use super::load_owned;

/// Command to edit an item. Absent fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateItemCommand {
    pub item_id: ItemId,
    pub user_id: UserId,
    pub text: Option<String>,
    pub weight: Option<i32>,
}

/// Handler for editing items.
pub struct UpdateItemHandler {
    repository: Arc<dyn DecisionRepository>,
}

impl UpdateItemHandler {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateItemCommand) -> Result<Item, DecisionError> {
        let mut item = self
            .repository
            .find_item(cmd.item_id)
            .await?
            .ok_or_else(|| DecisionError::item_not_found(cmd.item_id))?;
        load_owned(self.repository.as_ref(), item.decision_id(), cmd.user_id).await?;

        item.edit(cmd.text, cmd.weight)?;
        self.repository.update_item(&item, &Timestamp::now()).await?;
        Ok(item)
    }
}
