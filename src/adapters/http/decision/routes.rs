//! Axum routes for decision and item endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    add_item, create_decision, delete_decision, delete_item, get_decision, list_decisions,
    update_decision, update_item, DecisionAppState,
};

/// Decision routes, mounted under `/api`.
///
/// - `GET|POST /decisions`
/// - `GET|PUT|DELETE /decisions/:id`
/// - `POST /decisions/:id/items`
/// - `PUT|DELETE /items/:id`
pub fn decision_routes() -> Router<DecisionAppState> {
    Router::new()
        .route("/decisions", get(list_decisions).post(create_decision))
        .route(
            "/decisions/:id",
            get(get_decision).put(update_decision).delete(delete_decision),
        )
        .route("/decisions/:id/items", post(add_item))
        .route("/items/:id", put(update_item).delete(delete_item))
}
