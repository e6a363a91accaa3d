//! Decision domain module.
//!
//! A decision holds weighted pro and con items and is scored by the
//! scoring engine. Items are created through [`NewItem::new`], which binds
//! the stored weight's sign to the item kind.

mod aggregate;
mod errors;
mod item;

pub use aggregate::{Decision, NewDecision, DEFAULT_TITLE, MAX_TITLE_LENGTH};
pub use errors::DecisionError;
pub use item::{Item, ItemKind, NewItem, MAX_ITEM_TEXT_LENGTH};
