//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::application::AuthenticatedSession;
use crate::domain::foundation::UserId;

/// Request to register an account.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Account details plus a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub token: String,
}

impl From<AuthenticatedSession> for SessionResponse {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            id: session.user.id(),
            username: session.user.username().as_str().to_string(),
            email: session.user.email().map(|e| e.as_str().to_string()),
            token: session.token,
        }
    }
}
