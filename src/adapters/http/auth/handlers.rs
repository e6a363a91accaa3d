//! HTTP handlers for registration and login.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::extract::ApiJson;
use crate::application::{LoginCommand, LoginHandler, RegisterUserCommand, RegisterUserHandler};
use crate::domain::user::AccountError;
use crate::ports::{TokenIssuer, UserRepository};

use super::dto::{LoginRequest, RegisterRequest, SessionResponse};

/// Shared state for account endpoints.
#[derive(Clone)]
pub struct AuthAppState {
    pub user_repository: Arc<dyn UserRepository>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthAppState {
    pub fn new(user_repository: Arc<dyn UserRepository>, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            user_repository,
            token_issuer,
        }
    }

    pub fn register_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.user_repository.clone(), self.token_issuer.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.user_repository.clone(), self.token_issuer.clone())
    }
}

/// POST /api/register - Create an account and sign in
pub async fn register(
    State(state): State<AuthAppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Response {
    let cmd = RegisterUserCommand {
        username: req.username,
        email: req.email,
        password: req.password,
    };

    match state.register_handler().handle(cmd).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id(), "account registered");
            let response: SessionResponse = session.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_account_error(e),
    }
}

/// POST /api/login - Exchange credentials for a token
pub async fn login(State(state): State<AuthAppState>, ApiJson(req): ApiJson<LoginRequest>) -> Response {
    let cmd = LoginCommand {
        username: req.username,
        password: req.password,
    };

    match state.login_handler().handle(cmd).await {
        Ok(session) => {
            let response: SessionResponse = session.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_account_error(e),
    }
}

fn handle_account_error(error: AccountError) -> Response {
    match error {
        AccountError::UsernameTaken => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("USERNAME_TAKEN", error.to_string())),
        )
            .into_response(),
        AccountError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized(error.to_string())),
        )
            .into_response(),
        AccountError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::bad_request(message)
                    .with_details(serde_json::json!({ "field": field })),
            ),
        )
            .into_response(),
        AccountError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "account request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
