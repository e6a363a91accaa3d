//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Defines a serial (database-assigned) integer identifier.
macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier, rejecting non-positive values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::invalid_format(
                        $field,
                        "must be a positive integer",
                    ));
                }
                Ok(Self(value))
            }

            /// Wraps a value read back from storage (no validation).
            pub fn from_raw(value: i64) -> Self {
                Self(value)
            }

            /// Returns the inner integer.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::invalid_format($field, "not an integer"))?;
                Self::new(value)
            }
        }
    };
}

serial_id!(
    /// Identifier of a registered user.
    UserId,
    "user_id"
);

serial_id!(
    /// Identifier of a persisted decision.
    DecisionId,
    "decision_id"
);

serial_id!(
    /// Identifier of a persisted pro/con item.
    ItemId,
    "item_id"
);

/// Temporary identifier for a decision that exists only on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(Uuid);

impl DraftId {
    /// Creates a new random DraftId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draft-{}", self.0)
    }
}

/// Identity of a decision as seen by the client: unsaved draft or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DecisionKey {
    Draft(DraftId),
    Persisted(DecisionId),
}

impl DecisionKey {
    /// Returns the persisted id, if any.
    pub fn persisted(&self) -> Option<DecisionId> {
        match self {
            DecisionKey::Persisted(id) => Some(*id),
            DecisionKey::Draft(_) => None,
        }
    }

    /// True while the decision has not been saved to the backend.
    pub fn is_draft(&self) -> bool {
        matches!(self, DecisionKey::Draft(_))
    }
}

impl From<DecisionId> for DecisionKey {
    fn from(id: DecisionId) -> Self {
        DecisionKey::Persisted(id)
    }
}

impl fmt::Display for DecisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionKey::Draft(id) => write!(f, "{}", id),
            DecisionKey::Persisted(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_id_rejects_non_positive() {
        assert!(DecisionId::new(0).is_err());
        assert!(ItemId::new(-4).is_err());
        assert_eq!(UserId::new(7).unwrap().value(), 7);
    }

    #[test]
    fn serial_id_parses_from_path_segment() {
        let id: DecisionId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert!("abc".parse::<ItemId>().is_err());
    }

    #[test]
    fn serial_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&DecisionId::from_raw(12)).unwrap();
        assert_eq!(json, "12");
    }

    #[test]
    fn draft_ids_are_unique() {
        assert_ne!(DraftId::new(), DraftId::new());
    }

    #[test]
    fn decision_key_reports_persisted_id() {
        let draft = DecisionKey::Draft(DraftId::new());
        let saved = DecisionKey::from(DecisionId::from_raw(3));

        assert!(draft.is_draft());
        assert_eq!(draft.persisted(), None);
        assert!(!saved.is_draft());
        assert_eq!(saved.persisted(), Some(DecisionId::from_raw(3)));
    }
}
