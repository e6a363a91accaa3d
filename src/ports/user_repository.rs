//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{NewUser, User, Username};

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `UsernameTaken` if the username or email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Exact, case-sensitive username lookup.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
}
