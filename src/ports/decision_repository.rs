//! Decision repository port.
//!
//! Defines the contract for persisting Decision aggregates and their items.
//! Identifiers are assigned by the store on insert.
//!
//! # Design
//!
//! - **Aggregate reads**: a decision is always returned with its items
//! - **Parent bumps**: item writes also set the parent's `updated_at`
//! - **User-scoped listing**: ordered by `updated_at` descending

use async_trait::async_trait;

use crate::domain::decision::{Decision, Item, NewDecision, NewItem};
use crate::domain::foundation::{DecisionId, DomainError, ItemId, Timestamp, UserId};

/// Repository port for Decision aggregate persistence.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Insert a new decision and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, decision: &NewDecision) -> Result<Decision, DomainError>;

    /// Persist title, archived flag and `updated_at`.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, decision: &Decision) -> Result<(), DomainError>;

    /// Find a decision with its items ordered by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: DecisionId) -> Result<Option<Decision>, DomainError>;

    /// All decisions owned by a user, most recently updated first.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Decision>, DomainError>;

    /// Delete a decision and all of its items.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision doesn't exist
    async fn delete(&self, id: DecisionId) -> Result<(), DomainError>;

    /// Insert an item under a decision.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the parent doesn't exist
    async fn add_item(
        &self,
        decision_id: DecisionId,
        item: &NewItem,
        touched_at: &Timestamp,
    ) -> Result<Item, DomainError>;

    /// Find a single item.
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, DomainError>;

    /// Persist an edited item's text and weight.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the item doesn't exist
    async fn update_item(&self, item: &Item, touched_at: &Timestamp) -> Result<(), DomainError>;

    /// Delete a single item.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the item doesn't exist
    async fn delete_item(&self, id: ItemId, touched_at: &Timestamp) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn DecisionRepository) {}
    }
}
