//! PostgreSQL implementation of DecisionRepository.
//!
//! Persists Decision aggregates to the `decisions` and `items` tables.
//! Item writes bump the parent's `updated_at` in the same transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use crate::domain::decision::{Decision, Item, ItemKind, NewDecision, NewItem};
use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, ItemId, Timestamp, UserId, Weight,
};
use crate::ports::DecisionRepository;

/// PostgreSQL implementation of DecisionRepository.
#[derive(Clone)]
pub struct PostgresDecisionRepository {
    pool: PgPool,
}

impl PostgresDecisionRepository {
    /// Creates a new PostgresDecisionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn items_for(&self, decision_ids: &[i64]) -> Result<Vec<Item>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, decision_id, type, text, weight
            FROM items
            WHERE decision_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(decision_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch items", e))?;

        rows.into_iter().map(row_to_item).collect()
    }
}

#[async_trait]
impl DecisionRepository for PostgresDecisionRepository {
    async fn create(&self, decision: &NewDecision) -> Result<Decision, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO decisions (user_id, title, archived, created_at, updated_at)
            VALUES ($1, $2, FALSE, $3, $3)
            RETURNING id
            "#,
        )
        .bind(decision.user_id().value())
        .bind(decision.title())
        .bind(decision.created_at().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert decision", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::database("Failed to get id", e))?;

        Ok(Decision::from_new(DecisionId::from_raw(id), decision.clone()))
    }

    async fn update(&self, decision: &Decision) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE decisions SET
                title = $2,
                archived = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(decision.id().value())
        .bind(decision.title())
        .bind(decision.is_archived())
        .bind(decision.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update decision", e))?;

        if result.rows_affected() == 0 {
            return Err(decision_not_found(decision.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: DecisionId) -> Result<Option<Decision>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, archived, created_at, updated_at
            FROM decisions
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch decision", e))?;

        match row {
            Some(row) => {
                let items = self.items_for(&[id.value()]).await?;
                Ok(Some(row_to_decision(row, items)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Decision>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, archived, created_at, updated_at
            FROM decisions
            WHERE user_id = $1
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch decisions by user", e))?;

        let ids = rows
            .iter()
            .map(|row| row.try_get::<i64, _>("id"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::database("Failed to get id", e))?;

        let mut items_by_decision: HashMap<DecisionId, Vec<Item>> = HashMap::new();
        for item in self.items_for(&ids).await? {
            items_by_decision
                .entry(item.decision_id())
                .or_default()
                .push(item);
        }

        rows.into_iter()
            .zip(ids)
            .map(|(row, id)| {
                let items = items_by_decision
                    .remove(&DecisionId::from_raw(id))
                    .unwrap_or_default();
                row_to_decision(row, items)
            })
            .collect()
    }

    async fn delete(&self, id: DecisionId) -> Result<(), DomainError> {
        // Items go with it through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM decisions WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete decision", e))?;

        if result.rows_affected() == 0 {
            return Err(decision_not_found(id));
        }

        Ok(())
    }

    async fn add_item(
        &self,
        decision_id: DecisionId,
        item: &NewItem,
        touched_at: &Timestamp,
    ) -> Result<Item, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let bumped = sqlx::query("UPDATE decisions SET updated_at = $2 WHERE id = $1")
            .bind(decision_id.value())
            .bind(touched_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to touch decision", e))?;

        if bumped.rows_affected() == 0 {
            return Err(decision_not_found(decision_id));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO items (decision_id, type, text, weight)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(decision_id.value())
        .bind(item.kind().as_str())
        .bind(item.text())
        .bind(weight_to_db(item.weight()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert item", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::database("Failed to get id", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit item", e))?;

        Ok(Item::from_new(ItemId::from_raw(id), decision_id, item.clone()))
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, decision_id, type, text, weight
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch item", e))?;

        row.map(row_to_item).transpose()
    }

    async fn update_item(&self, item: &Item, touched_at: &Timestamp) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = sqlx::query("UPDATE items SET text = $2, weight = $3 WHERE id = $1")
            .bind(item.id().value())
            .bind(item.text())
            .bind(weight_to_db(item.weight()))
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to update item", e))?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(item.id()));
        }

        touch_parent(&mut tx, item.decision_id(), touched_at).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit item", e))
    }

    async fn delete_item(&self, id: ItemId, touched_at: &Timestamp) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let row = sqlx::query("DELETE FROM items WHERE id = $1 RETURNING decision_id")
            .bind(id.value())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete item", e))?
            .ok_or_else(|| item_not_found(id))?;

        let decision_id: i64 = row
            .try_get("decision_id")
            .map_err(|e| DomainError::database("Failed to get decision_id", e))?;

        touch_parent(&mut tx, DecisionId::from_raw(decision_id), touched_at).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit item", e))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

async fn touch_parent(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    decision_id: DecisionId,
    touched_at: &Timestamp,
) -> Result<(), DomainError> {
    sqlx::query("UPDATE decisions SET updated_at = $2 WHERE id = $1")
        .bind(decision_id.value())
        .bind(touched_at.as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to touch decision", e))?;
    Ok(())
}

fn decision_not_found(id: DecisionId) -> DomainError {
    DomainError::new(ErrorCode::DecisionNotFound, format!("Decision not found: {}", id))
}

fn item_not_found(id: ItemId) -> DomainError {
    DomainError::new(ErrorCode::ItemNotFound, format!("Item not found: {}", id))
}

fn weight_to_db(weight: Weight) -> i16 {
    // Weight is bounded to [-10, 10].
    weight.value() as i16
}

fn row_to_decision(row: sqlx::postgres::PgRow, items: Vec<Item>) -> Result<Decision, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::database("Failed to get id", e))?;
    let user_id: i64 = row
        .try_get("user_id")
        .map_err(|e| DomainError::database("Failed to get user_id", e))?;
    let title: String = row
        .try_get("title")
        .map_err(|e| DomainError::database("Failed to get title", e))?;
    let archived: bool = row
        .try_get("archived")
        .map_err(|e| DomainError::database("Failed to get archived", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::database("Failed to get created_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| DomainError::database("Failed to get updated_at", e))?;

    Ok(Decision::reconstitute(
        DecisionId::from_raw(id),
        UserId::from_raw(user_id),
        title,
        archived,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        items,
    ))
}

fn row_to_item(row: sqlx::postgres::PgRow) -> Result<Item, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::database("Failed to get id", e))?;
    let decision_id: i64 = row
        .try_get("decision_id")
        .map_err(|e| DomainError::database("Failed to get decision_id", e))?;
    let kind: String = row
        .try_get("type")
        .map_err(|e| DomainError::database("Failed to get type", e))?;
    let text: String = row
        .try_get("text")
        .map_err(|e| DomainError::database("Failed to get text", e))?;
    let weight: i16 = row
        .try_get("weight")
        .map_err(|e| DomainError::database("Failed to get weight", e))?;

    let kind = ItemKind::parse(&kind).map_err(|e| DomainError::database("Invalid item type", e))?;
    let weight =
        Weight::new(i32::from(weight)).map_err(|e| DomainError::database("Invalid item weight", e))?;

    Ok(Item::reconstitute(
        ItemId::from_raw(id),
        DecisionId::from_raw(decision_id),
        kind,
        text,
        weight,
    ))
}
