//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Server Ports
//!
//! - `DecisionRepository` - Decision and item persistence
//! - `UserRepository` - Account persistence
//! - `SessionValidator` - Bearer token validation
//! - `TokenIssuer` - Bearer token minting
//!
//! ## Client Ports
//!
//! - `DecisionApi` - Backend calls made by the client state container
//! - `LocalStore` - Persistent client-side key-value storage

mod decision_api;
mod decision_repository;
mod local_store;
mod session_validator;
mod token_issuer;
mod user_repository;

pub use decision_api::{
    ApiError, DecisionApi, DecisionListing, DecisionPatch, Registration, RemoteDecision,
    RemoteItem, SessionGrant,
};
pub use decision_repository::DecisionRepository;
pub use local_store::{LocalStore, LocalStoreError};
pub use session_validator::SessionValidator;
pub use token_issuer::TokenIssuer;
pub use user_repository::UserRepository;
