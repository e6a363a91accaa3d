//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the PivotPoint domain.

mod auth;
mod errors;
mod ids;
mod timestamp;
mod weight;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DecisionId, DecisionKey, DraftId, ItemId, UserId};
pub use timestamp::Timestamp;
pub use weight::{Weight, MAX_WEIGHT};
