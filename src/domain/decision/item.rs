//! Pro/con items and the sign convention that binds weight to kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DecisionId, ItemId, ValidationError, Weight, MAX_WEIGHT};

/// Maximum length for item text.
pub const MAX_ITEM_TEXT_LENGTH: usize = 500;

/// Which side of the scale an item sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Pro,
    Con,
}

impl ItemKind {
    /// +1 for pros, -1 for cons.
    pub fn sign(&self) -> i32 {
        match self {
            ItemKind::Pro => 1,
            ItemKind::Con => -1,
        }
    }

    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Pro => "pro",
            ItemKind::Con => "con",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pro" => Ok(ItemKind::Pro),
            "con" => Ok(ItemKind::Con),
            other => Err(ValidationError::invalid_format(
                "type",
                format!("expected 'pro' or 'con', got '{}'", other),
            )),
        }
    }

    /// Applies this kind's sign to a user-entered magnitude.
    ///
    /// The sign the caller typed is discarded; only the magnitude counts.
    pub fn signed_weight(&self, magnitude: i32) -> Result<Weight, ValidationError> {
        let magnitude = magnitude.checked_abs().ok_or_else(|| {
            ValidationError::out_of_range("weight", -MAX_WEIGHT, MAX_WEIGHT, magnitude)
        })?;
        Weight::new(self.sign() * magnitude)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated item that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    kind: ItemKind,
    text: String,
    weight: Weight,
}

impl NewItem {
    /// Builds an item, normalising the weight's sign from its kind.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is blank
    /// - `InvalidFormat` if the text is too long
    /// - `OutOfRange` if the magnitude exceeds 10
    pub fn new(kind: ItemKind, text: impl Into<String>, magnitude: i32) -> Result<Self, ValidationError> {
        let text = validate_text(text.into())?;
        let weight = kind.signed_weight(magnitude)?;
        Ok(Self { kind, text, weight })
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}

/// A persisted item belonging to a decision.
///
/// # Invariants
///
/// - Pro weights are >= 0, con weights are <= 0
/// - `text` is non-blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    decision_id: DecisionId,
    kind: ItemKind,
    text: String,
    weight: Weight,
}

impl Item {
    /// Reconstitute an item from persistence (no validation).
    pub fn reconstitute(
        id: ItemId,
        decision_id: DecisionId,
        kind: ItemKind,
        text: String,
        weight: Weight,
    ) -> Self {
        Self {
            id,
            decision_id,
            kind,
            text,
            weight,
        }
    }

    /// Attaches storage identity to a validated new item.
    pub fn from_new(id: ItemId, decision_id: DecisionId, item: NewItem) -> Self {
        Self {
            id,
            decision_id,
            kind: item.kind,
            text: item.text,
            weight: item.weight,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn decision_id(&self) -> DecisionId {
        self.decision_id
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Changes text and/or weight. The kind's sign is re-applied to the weight.
    ///
    /// Returns true if anything was supplied.
    pub fn edit(&mut self, text: Option<String>, magnitude: Option<i32>) -> Result<bool, ValidationError> {
        let text = text.map(validate_text).transpose()?;
        let weight = magnitude.map(|m| self.kind.signed_weight(m)).transpose()?;

        let changed = text.is_some() || weight.is_some();
        if let Some(text) = text {
            self.text = text;
        }
        if let Some(weight) = weight {
            self.weight = weight;
        }
        Ok(changed)
    }
}

fn validate_text(text: String) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("text"));
    }
    if trimmed.chars().count() > MAX_ITEM_TEXT_LENGTH {
        return Err(ValidationError::invalid_format(
            "text",
            format!("must be at most {} characters", MAX_ITEM_TEXT_LENGTH),
        ));
    }
    Ok(trimmed.to_string())
}
