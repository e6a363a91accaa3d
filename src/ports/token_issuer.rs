//! Token issuing port.
//!
//! The counterpart of [`SessionValidator`](super::SessionValidator): tokens
//! minted here must be accepted by the validator configured alongside it.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Mints bearer tokens for freshly authenticated users.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issue an access token carrying the user's identity.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if signing fails
    async fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;
}
