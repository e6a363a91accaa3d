//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own module with `dto`, `handlers` and `routes`.
//! `router` stitches them together behind the auth middleware.

pub mod auth;
pub mod decision;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;

pub use error::ErrorResponse;
pub use extract::ApiJson;
pub use router::{api_router, build_router, health, AppState, HttpSettings};
