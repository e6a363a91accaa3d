//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresDecisionRepository` - Decisions and their items
//! - `PostgresUserRepository` - Accounts
//!
//! Schema lives in `migrations/` and is applied with `sqlx::migrate!`.

mod decision_repository;
mod user_repository;

pub use decision_repository::PostgresDecisionRepository;
pub use user_repository::PostgresUserRepository;
