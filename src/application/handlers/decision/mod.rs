//! Decision command and query handlers.
//!
//! Every handler checks that the requesting user owns the decision it
//! touches before reading or writing.

mod add_item;
mod create_decision;
mod delete_decision;
mod delete_item;
mod get_decision;
mod list_decisions;
mod update_decision;
mod update_item;

pub use add_item::{AddItemCommand, AddItemHandler};
pub use create_decision::{CreateDecisionCommand, CreateDecisionHandler};
pub use delete_decision::{DeleteDecisionCommand, DeleteDecisionHandler};
pub use delete_item::{DeleteItemCommand, DeleteItemHandler};
pub use get_decision::{GetDecisionHandler, GetDecisionQuery};
pub use list_decisions::{DecisionLists, ListDecisionsHandler, ListDecisionsQuery};
pub use update_decision::{UpdateDecisionCommand, UpdateDecisionHandler};
pub use update_item::{UpdateItemCommand, UpdateItemHandler};

use crate::domain::decision::{Decision, DecisionError};
use crate::domain::foundation::{DecisionId, UserId};
use crate::ports::DecisionRepository;

/// Loads a decision and checks ownership.
async fn load_owned(
    repository: &dyn DecisionRepository,
    decision_id: DecisionId,
    user_id: UserId,
) -> Result<Decision, DecisionError> {
    let decision = repository
        .find_by_id(decision_id)
        .await?
        .ok_or_else(|| DecisionError::not_found(decision_id))?;
    decision.authorize(user_id)?;
    Ok(decision)
}
