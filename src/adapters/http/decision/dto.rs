//! HTTP DTOs for decision and item endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::DecisionLists;
use crate::domain::decision::{Decision, Item, ItemKind};
use crate::domain::foundation::{DecisionId, ItemId, Timestamp, UserId};
use crate::domain::scoring::Score;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a decision. An absent title falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDecisionRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Partial update of a decision.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDecisionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

/// Request to add an item.
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub weight: i32,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: ItemKind,
}

fn default_kind() -> ItemKind {
    ItemKind::Pro
}

/// Partial update of an item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub weight: Option<i32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A single pro or con.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub decision_id: DecisionId,
    pub text: String,
    pub weight: i32,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id(),
            decision_id: item.decision_id(),
            text: item.text().to_string(),
            weight: item.weight().value(),
            kind: item.kind(),
        }
    }
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self::from(&item)
    }
}

/// A decision with its items and current score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub id: DecisionId,
    pub user_id: UserId,
    pub title: String,
    pub archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub pros: Vec<ItemResponse>,
    pub cons: Vec<ItemResponse>,
    pub score: Score,
}

impl From<&Decision> for DecisionResponse {
    fn from(decision: &Decision) -> Self {
        Self {
            id: decision.id(),
            user_id: decision.user_id(),
            title: decision.title().to_string(),
            archived: decision.is_archived(),
            created_at: *decision.created_at(),
            updated_at: *decision.updated_at(),
            pros: decision.pros().map(ItemResponse::from).collect(),
            cons: decision.cons().map(ItemResponse::from).collect(),
            score: decision.score(),
        }
    }
}

impl From<Decision> for DecisionResponse {
    fn from(decision: Decision) -> Self {
        Self::from(&decision)
    }
}

/// The user's decisions split by archive state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionListResponse {
    pub active: Vec<DecisionResponse>,
    pub archived: Vec<DecisionResponse>,
}

impl From<DecisionLists> for DecisionListResponse {
    fn from(lists: DecisionLists) -> Self {
        Self {
            active: lists.active.iter().map(DecisionResponse::from).collect(),
            archived: lists.archived.iter().map(DecisionResponse::from).collect(),
        }
    }
}

/// Body returned by delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
