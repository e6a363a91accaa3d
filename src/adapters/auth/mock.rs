//! Mock authentication adapter for testing.
//!
//! Implements the `SessionValidator` and `TokenIssuer` ports without any
//! cryptography: tokens are opaque strings mapped to users.
//!
//! # Example
//!
//! ```ignore
//! use pivot_point::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_test_user("valid-token", 1);
//! let result = validator.validate("valid-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::{SessionValidator, TokenIssuer};

/// Mock session validator and token issuer.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
/// `issue` registers a token of the form `mock-token-<user id>`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a valid token for a user named `user<id>`.
    pub fn with_test_user(self, token: impl Into<String>, user_id: i64) -> Self {
        let user = AuthenticatedUser::new(
            UserId::from_raw(user_id),
            format!("user{}", user_id),
            None,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *write(&self.force_error) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        write(&self.tokens).insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        write(&self.tokens).remove(token);
    }

    /// Returns the number of registered valid tokens.
    pub fn token_count(&self) -> usize {
        read(&self.tokens).len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = read(&self.force_error).clone() {
            return Err(error);
        }

        read(&self.tokens)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[async_trait]
impl TokenIssuer for MockSessionValidator {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        if let Some(error) = read(&self.force_error).clone() {
            return Err(error);
        }

        let token = format!("mock-token-{}", user.id);
        self.add_token(token.clone(), user.clone());
        Ok(token)
    }
}

// A panic while holding the lock leaves the map itself intact.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}
