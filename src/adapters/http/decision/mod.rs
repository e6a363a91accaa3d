//! HTTP adapter for decisions and their items.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::DecisionAppState;
pub use routes::decision_routes;
