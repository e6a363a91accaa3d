//! In-memory UserRepository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{NewUser, User, Username};
use crate::ports::UserRepository;

/// In-memory account storage with unique usernames and emails.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let duplicate = users.iter().any(|u| {
            u.username() == &user.username
                || matches!((u.email(), user.email.as_ref()), (Some(a), Some(b)) if a == b)
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::UsernameTaken,
                "Username or email already exists",
            ));
        }

        let id = UserId::from_raw(users.len() as i64 + 1);
        let created = User::from_new(id, user.clone());
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }
}
