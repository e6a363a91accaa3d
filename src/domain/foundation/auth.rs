//! Authentication types for the domain layer.
//!
//! These types represent a user extracted from a validated bearer token.
//! They have no dependency on how tokens are minted; any implementation of
//! the `SessionValidator` port can populate them.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's database identifier.
    pub id: UserId,

    /// Login name.
    pub username: String,

    /// Email address, if the user supplied one at registration.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, username: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The token could not be minted or checked (configuration, crypto).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
