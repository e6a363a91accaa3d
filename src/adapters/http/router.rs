//! Top-level router: health check, account routes and decision routes
//! behind the auth middleware, wrapped in tracing, CORS and timeout layers.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::ports::{DecisionRepository, SessionValidator, TokenIssuer, UserRepository};

use super::auth::{auth_routes, AuthAppState};
use super::decision::{decision_routes, DecisionAppState};
use super::middleware::{auth_middleware, AuthState};

/// Everything the HTTP layer needs from the outside world.
#[derive(Clone)]
pub struct AppState {
    pub decisions: DecisionAppState,
    pub accounts: AuthAppState,
    pub session_validator: AuthState,
}

impl AppState {
    pub fn new(
        decision_repository: Arc<dyn DecisionRepository>,
        user_repository: Arc<dyn UserRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
        session_validator: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            decisions: DecisionAppState::new(decision_repository),
            accounts: AuthAppState::new(user_repository, token_issuer),
            session_validator,
        }
    }
}

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Routes without layers. Useful for tests that drive the router directly.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth_routes().with_state(state.accounts))
        .merge(decision_routes().with_state(state.decisions))
        .layer(middleware::from_fn_with_state(
            state.session_validator,
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

/// The full application router.
pub fn build_router(state: AppState, settings: &HttpSettings) -> Router {
    api_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&settings.cors_origins))
            .layer(TimeoutLayer::new(settings.request_timeout)),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
