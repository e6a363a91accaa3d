//! Axum routes for account endpoints.

use axum::{routing::post, Router};

use super::handlers::{login, register, AuthAppState};

/// Account routes, mounted under `/api`. Neither requires a token.
pub fn auth_routes() -> Router<AuthAppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
