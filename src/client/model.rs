//! Client-side view of a decision.
//!
//! A board decision is either an unsaved draft (keyed by a [`DraftId`]) or
//! a mirror of a persisted decision. Items only ever exist on persisted
//! decisions because adding the first item promotes the draft.

use crate::domain::decision::{Item, ItemKind, DEFAULT_TITLE};
use crate::domain::foundation::{DecisionId, DecisionKey, DraftId, ItemId, Timestamp};
use crate::domain::scoring::{Score, ScoringEngine};
use crate::ports::{ApiError, RemoteDecision};

#[derive(Debug, Clone, PartialEq)]
pub struct BoardDecision {
    key: DecisionKey,
    title: String,
    archived: bool,
    created_at: Timestamp,
    items: Vec<Item>,
}

impl BoardDecision {
    /// A fresh, unsaved decision.
    pub fn draft() -> Self {
        Self {
            key: DecisionKey::Draft(DraftId::new()),
            title: DEFAULT_TITLE.to_string(),
            archived: false,
            created_at: Timestamp::now(),
            items: Vec::new(),
        }
    }

    /// Mirrors a decision returned by the backend.
    pub fn from_remote(remote: RemoteDecision) -> Result<Self, ApiError> {
        let items = remote
            .pros
            .into_iter()
            .chain(remote.cons)
            .map(|item| item.into_item())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            key: DecisionKey::Persisted(remote.id),
            title: remote.title,
            archived: remote.archived,
            created_at: remote.created_at,
            items,
        })
    }

    pub fn key(&self) -> DecisionKey {
        self.key
    }

    pub fn persisted_id(&self) -> Option<DecisionId> {
        self.key.persisted()
    }

    pub fn is_draft(&self) -> bool {
        self.key.is_draft()
    }

    pub fn is(&self, id: DecisionId) -> bool {
        self.key == DecisionKey::Persisted(id)
    }

    /// Swaps the draft key for the id the backend assigned.
    pub fn promote(&mut self, id: DecisionId, created_at: Timestamp) {
        self.key = DecisionKey::Persisted(id);
        self.created_at = created_at;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn set_archived(&mut self, archived: bool) {
        self.archived = archived;
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn pros(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.kind() == ItemKind::Pro)
    }

    pub fn cons(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.kind() == ItemKind::Con)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn score(&self) -> Score {
        ScoringEngine::evaluate(
            self.pros().map(|i| i.weight().value()),
            self.cons().map(|i| i.weight().value()),
        )
    }
}
