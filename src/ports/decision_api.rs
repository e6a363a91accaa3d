//! Decision API port (client side).
//!
//! The contract the client state container uses to reach the backend.
//! Wire records mirror the JSON the HTTP adapter serves.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::decision::{Item, ItemKind, NewItem};
use crate::domain::foundation::{DecisionId, ItemId, Timestamp, UserId, Weight};

/// Errors surfaced by a decision API client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP 401, or no token available to send.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns true if the client should drop its session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub id: ItemId,
    pub decision_id: DecisionId,
    pub text: String,
    pub weight: i32,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl RemoteItem {
    /// Converts to a domain item, re-applying the kind's sign.
    pub fn into_item(self) -> Result<Item, ApiError> {
        let weight: Weight = self
            .kind
            .signed_weight(self.weight)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Item::reconstitute(
            self.id,
            self.decision_id,
            self.kind,
            self.text,
            weight,
        ))
    }
}

/// Decision as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDecision {
    pub id: DecisionId,
    pub title: String,
    #[serde(default)]
    pub archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub pros: Vec<RemoteItem>,
    #[serde(default)]
    pub cons: Vec<RemoteItem>,
}

/// `GET /decisions` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionListing {
    #[serde(default)]
    pub active: Vec<RemoteDecision>,
    #[serde(default)]
    pub archived: Vec<RemoteDecision>,
}

/// Body returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub token: String,
}

/// Registration request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

/// Partial update for a decision. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl DecisionPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            archived: None,
        }
    }

    pub fn archived(archived: bool) -> Self {
        Self {
            title: None,
            archived: Some(archived),
        }
    }
}

/// Backend operations available to the client.
///
/// Calls that need a session answer [`ApiError::Unauthorized`] without
/// touching the network when no token is set.
#[async_trait]
pub trait DecisionApi: Send + Sync {
    /// Replace (or clear) the bearer token sent with requests.
    async fn set_token(&self, token: Option<String>);

    async fn login(&self, username: &str, password: &str) -> Result<SessionGrant, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<SessionGrant, ApiError>;

    async fn list_decisions(&self) -> Result<DecisionListing, ApiError>;

    async fn create_decision(&self, title: &str) -> Result<RemoteDecision, ApiError>;

    async fn update_decision(
        &self,
        id: DecisionId,
        patch: &DecisionPatch,
    ) -> Result<RemoteDecision, ApiError>;

    async fn delete_decision(&self, id: DecisionId) -> Result<(), ApiError>;

    async fn add_item(&self, decision_id: DecisionId, item: &NewItem)
        -> Result<RemoteItem, ApiError>;

    async fn delete_item(&self, id: ItemId) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_api_is_object_safe() {
        fn _accepts_dyn(_api: &dyn DecisionApi) {}
    }

    #[test]
    fn remote_item_normalises_sign() {
        let remote = RemoteItem {
            id: ItemId::from_raw(1),
            decision_id: DecisionId::from_raw(2),
            text: "Cost".to_string(),
            weight: 4,
            kind: ItemKind::Con,
        };
        assert_eq!(remote.into_item().unwrap().weight().value(), -4);
    }

    #[test]
    fn remote_item_reads_type_field() {
        let json = r#"{"id":3,"decision_id":1,"text":"Pay","weight":6,"type":"pro"}"#;
        let remote: RemoteItem = serde_json::from_str(json).unwrap();
        assert_eq!(remote.kind, ItemKind::Pro);
    }

    #[test]
    fn patch_omits_absent_fields() {
        let json = serde_json::to_value(DecisionPatch::archived(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "archived": true }));
    }
}
