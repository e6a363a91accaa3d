//! HTTP adapter for registration and login.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AuthAppState;
pub use routes::auth_routes;
