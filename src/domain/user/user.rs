//! User account entity.

use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};

use super::account::{Email, Username};
use super::password::PasswordHash;

/// A registration that has passed validation and hashing.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Option<Email>,
    pub password_hash: PasswordHash,
    pub created_at: Timestamp,
}

impl NewUser {
    pub fn new(username: Username, email: Option<Email>, password_hash: PasswordHash) -> Self {
        Self {
            username,
            email,
            password_hash,
            created_at: Timestamp::now(),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    email: Option<Email>,
    password_hash: PasswordHash,
    created_at: Timestamp,
}

impl User {
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            created_at: new.created_at,
        }
    }

    /// Reconstitute a user from persistence (no validation).
    pub fn reconstitute(
        id: UserId,
        username: Username,
        email: Option<Email>,
        password_hash: PasswordHash,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Checks a login attempt against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash.verify(password)
    }

    /// Identity carried in issued tokens.
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(
            self.id,
            self.username.as_str(),
            self.email.as_ref().map(|e| e.as_str().to_string()),
        )
    }
}
