//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `api_client` - reqwest client for the backend (client side)
//! - `auth` - JWT token service and a mock validator
//! - `http` - axum REST API
//! - `memory` - in-memory repositories
//! - `postgres` - sqlx repositories
//! - `storage` - local key-value stores (client side)

pub mod api_client;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;

pub use api_client::{ApiClientConfig, HttpDecisionApi};
pub use auth::{JwtConfig, JwtTokenService, MockSessionValidator};
pub use memory::{InMemoryDecisionRepository, InMemoryUserRepository};
pub use postgres::{PostgresDecisionRepository, PostgresUserRepository};
pub use storage::{FileLocalStore, InMemoryLocalStore};
