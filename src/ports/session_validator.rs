//! Bearer token validation.
//!
//! The auth middleware only sees this trait. `JwtTokenService` implements it
//! for real HS256 tokens, `MockSessionValidator` for tests.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Turns a bearer token into the user it was issued to.
///
/// A bad signature, wrong issuer or garbage input is `InvalidToken`; a token
/// past its `exp` is `TokenExpired`. `ServiceUnavailable` is reserved for
/// validators that depend on something remote.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the raw value, without the `Bearer ` prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Simple mock implementation for testing the trait
    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, user: AuthenticatedUser) {
            self.tokens.write().unwrap().insert(token.to_string(), user);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn session_validator_returns_user_for_valid_token() {
        let validator = TestSessionValidator::new();
        validator.add_valid_token(
            "valid-token-123",
            AuthenticatedUser::new(UserId::from_raw(7), "alice", None),
        );

        let user = validator.validate("valid-token-123").await.unwrap();

        assert_eq!(user.id, UserId::from_raw(7));
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn session_validator_returns_error_for_invalid_token() {
        let validator = TestSessionValidator::new();

        let result = validator.validate("invalid-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
