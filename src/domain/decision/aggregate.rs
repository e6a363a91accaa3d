//! Decision aggregate entity.
//!
//! A decision is a titled pros/cons evaluation owned by one user. It owns its
//! items; items have no lifecycle outside their decision.

use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, ItemId, Timestamp, UserId, ValidationError,
};
use crate::domain::scoring::{Score, ScoringEngine};

use super::item::{Item, ItemKind};

/// Maximum length for decision title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Title given to decisions created without one.
pub const DEFAULT_TITLE: &str = "New Decision";

/// A validated decision that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDecision {
    user_id: UserId,
    title: String,
    created_at: Timestamp,
}

impl NewDecision {
    /// A missing or blank title falls back to [`DEFAULT_TITLE`].
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the title is longer than 500 characters
    pub fn new(user_id: UserId, title: Option<String>) -> Result<Self, ValidationError> {
        let title = title_or_default(title.unwrap_or_default())?;
        Ok(Self {
            user_id,
            title,
            created_at: Timestamp::now(),
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Decision aggregate.
///
/// # Invariants
///
/// - `title` is 1-500 characters, non-blank
/// - every item's `decision_id` equals `id`
/// - `updated_at` never precedes `created_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    id: DecisionId,
    user_id: UserId,
    title: String,
    archived: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
    items: Vec<Item>,
}

impl Decision {
    /// Attaches storage identity to a validated new decision.
    pub fn from_new(id: DecisionId, new: NewDecision) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title,
            archived: false,
            created_at: new.created_at,
            updated_at: new.created_at,
            items: Vec::new(),
        }
    }

    /// Reconstitute a decision from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DecisionId,
        user_id: UserId,
        title: String,
        archived: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
        items: Vec<Item>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            archived,
            created_at,
            updated_at,
            items,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> DecisionId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items counting in favour.
    pub fn pros(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.kind() == ItemKind::Pro)
    }

    /// Items counting against.
    pub fn cons(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.kind() == ItemKind::Con)
    }

    /// Finds one of this decision's items.
    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    /// Runs the scoring engine over the current items.
    pub fn score(&self) -> Score {
        ScoringEngine::evaluate(
            self.pros().map(|i| i.weight().value()),
            self.cons().map(|i| i.weight().value()),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this decision.
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Validates that the user can access this decision.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize(&self, user_id: UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not authorized to access this decision",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the decision, returning the old title.
    ///
    /// A blank title falls back to [`DEFAULT_TITLE`], as on creation.
    pub fn rename(&mut self, new_title: String) -> Result<String, ValidationError> {
        let new_title = title_or_default(new_title)?;
        let old_title = std::mem::replace(&mut self.title, new_title);
        self.touch();
        Ok(old_title)
    }

    /// Moves the decision into or out of the archive.
    ///
    /// Returns true if the flag changed.
    pub fn set_archived(&mut self, archived: bool) -> bool {
        let changed = self.archived != archived;
        self.archived = archived;
        self.touch();
        changed
    }

    pub fn archive(&mut self) -> bool {
        self.set_archived(true)
    }

    pub fn restore(&mut self) -> bool {
        self.set_archived(false)
    }

    /// Appends a persisted item.
    pub fn add_item(&mut self, item: Item) -> Result<(), DomainError> {
        if item.decision_id() != self.id {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Item {} belongs to decision {}", item.id(), item.decision_id()),
            ));
        }
        self.items.push(item);
        self.touch();
        Ok(())
    }

    /// Replaces an item with an edited copy. Returns false if absent.
    pub fn replace_item(&mut self, item: Item) -> bool {
        match self.items.iter_mut().find(|i| i.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Removes an item, returning it if present.
    pub fn remove_item(&mut self, item_id: ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.id() == item_id)?;
        self.touch();
        Some(self.items.remove(pos))
    }

    /// Bumps `updated_at` to now.
    pub fn touch(&mut self) {
        let now = Timestamp::now();
        if now.is_after(&self.updated_at) {
            self.updated_at = now;
        }
    }
}

fn title_or_default(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_TITLE.to_string());
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::invalid_format(
            "title",
            format!("must be at most {} characters", MAX_TITLE_LENGTH),
        ));
    }
    Ok(trimmed.to_string())
}
