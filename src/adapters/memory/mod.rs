//! In-memory repository adapters.
//!
//! Implementations of the persistence ports backed by process memory.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::memory::{InMemoryDecisionRepository, InMemoryUserRepository};
//!
//! let decisions = Arc::new(InMemoryDecisionRepository::new());
//! let users = Arc::new(InMemoryUserRepository::new());
//! ```

mod decision_repository;
mod user_repository;

pub use decision_repository::InMemoryDecisionRepository;
pub use user_repository::InMemoryUserRepository;
