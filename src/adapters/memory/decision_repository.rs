//! In-memory DecisionRepository.
//!
//! Mirrors the PostgreSQL adapter's behaviour (serial ids, cascade delete,
//! parent bumps on item writes). Used by tests and local development.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::decision::{Decision, Item, NewDecision, NewItem};
use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, ItemId, Timestamp, UserId,
};
use crate::ports::DecisionRepository;

#[derive(Debug, Clone)]
struct DecisionRow {
    user_id: UserId,
    title: String,
    archived: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug, Default)]
struct Tables {
    last_decision_id: i64,
    last_item_id: i64,
    decisions: HashMap<DecisionId, DecisionRow>,
    items: BTreeMap<ItemId, Item>,
}

impl Tables {
    fn assemble(&self, id: DecisionId, row: &DecisionRow) -> Decision {
        let items = self
            .items
            .values()
            .filter(|i| i.decision_id() == id)
            .cloned()
            .collect();
        Decision::reconstitute(
            id,
            row.user_id,
            row.title.clone(),
            row.archived,
            row.created_at,
            row.updated_at,
            items,
        )
    }

    fn bump(&mut self, id: DecisionId, touched_at: &Timestamp) {
        if let Some(row) = self.decisions.get_mut(&id) {
            row.updated_at = *touched_at;
        }
    }
}

/// In-memory storage for decisions and items.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDecisionRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDecisionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored decisions (useful for tests).
    pub async fn decision_count(&self) -> usize {
        self.tables.read().await.decisions.len()
    }

    /// Number of stored items across all decisions.
    pub async fn item_count(&self) -> usize {
        self.tables.read().await.items.len()
    }
}

fn decision_not_found(id: DecisionId) -> DomainError {
    DomainError::new(ErrorCode::DecisionNotFound, format!("Decision not found: {}", id))
}

fn item_not_found(id: ItemId) -> DomainError {
    DomainError::new(ErrorCode::ItemNotFound, format!("Item not found: {}", id))
}

#[async_trait]
impl DecisionRepository for InMemoryDecisionRepository {
    async fn create(&self, decision: &NewDecision) -> Result<Decision, DomainError> {
        let mut tables = self.tables.write().await;
        tables.last_decision_id += 1;
        let id = DecisionId::from_raw(tables.last_decision_id);
        tables.decisions.insert(
            id,
            DecisionRow {
                user_id: decision.user_id(),
                title: decision.title().to_string(),
                archived: false,
                created_at: *decision.created_at(),
                updated_at: *decision.created_at(),
            },
        );
        Ok(Decision::from_new(id, decision.clone()))
    }

    async fn update(&self, decision: &Decision) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .decisions
            .get_mut(&decision.id())
            .ok_or_else(|| decision_not_found(decision.id()))?;
        row.title = decision.title().to_string();
        row.archived = decision.is_archived();
        row.updated_at = *decision.updated_at();
        Ok(())
    }

    async fn find_by_id(&self, id: DecisionId) -> Result<Option<Decision>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .decisions
            .get(&id)
            .map(|row| tables.assemble(id, row)))
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Decision>, DomainError> {
        let tables = self.tables.read().await;
        let mut decisions: Vec<Decision> = tables
            .decisions
            .iter()
            .filter(|(_, row)| row.user_id == user_id)
            .map(|(id, row)| tables.assemble(*id, row))
            .collect();
        decisions.sort_by(|a, b| {
            b.updated_at()
                .cmp(a.updated_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(decisions)
    }

    async fn delete(&self, id: DecisionId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.decisions.remove(&id).is_none() {
            return Err(decision_not_found(id));
        }
        tables.items.retain(|_, item| item.decision_id() != id);
        Ok(())
    }

    async fn add_item(
        &self,
        decision_id: DecisionId,
        item: &NewItem,
        touched_at: &Timestamp,
    ) -> Result<Item, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.decisions.contains_key(&decision_id) {
            return Err(decision_not_found(decision_id));
        }
        tables.last_item_id += 1;
        let id = ItemId::from_raw(tables.last_item_id);
        let stored = Item::from_new(id, decision_id, item.clone());
        tables.items.insert(id, stored.clone());
        tables.bump(decision_id, touched_at);
        Ok(stored)
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, DomainError> {
        Ok(self.tables.read().await.items.get(&id).cloned())
    }

    async fn update_item(&self, item: &Item, touched_at: &Timestamp) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .items
            .get_mut(&item.id())
            .ok_or_else(|| item_not_found(item.id()))?;
        *slot = item.clone();
        tables.bump(item.decision_id(), touched_at);
        Ok(())
    }

    async fn delete_item(&self, id: ItemId, touched_at: &Timestamp) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let removed = tables.items.remove(&id).ok_or_else(|| item_not_found(id))?;
        tables.bump(removed.decision_id(), touched_at);
        Ok(())
    }
}
