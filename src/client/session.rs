//! Client login state.
//!
//! `AuthSession` keeps the bearer token and the signed-in user in the
//! [`LocalStore`] under the `token` and `user` keys, and mirrors the token
//! into the [`DecisionApi`] client.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::user::PasswordPolicy;
use crate::ports::{ApiError, DecisionApi, LocalStore, LocalStoreError, Registration, SessionGrant};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Errors raised by login, registration and session restore.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The form was rejected before anything was sent.
    #[error("{0}")]
    Invalid(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Api(ApiError),

    #[error(transparent)]
    Store(#[from] LocalStoreError),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidFormat { reason, .. } => SessionError::Invalid(reason),
            other => SessionError::Invalid(other.to_string()),
        }
    }
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => SessionError::InvalidCredentials,
            ApiError::Status { message, .. } => SessionError::Invalid(message),
            other => SessionError::Api(other),
        }
    }
}

/// Profile cached alongside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<&SessionGrant> for StoredUser {
    fn from(grant: &SessionGrant) -> Self {
        Self {
            id: grant.id,
            username: grant.username.clone(),
            email: grant.email.clone(),
        }
    }
}

/// Registration form as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Confirmation is checked before length, so a mismatch wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        PasswordPolicy::check_confirmation(&self.password, &self.confirm_password)?;
        PasswordPolicy::check(&self.password)
    }

    fn to_registration(&self) -> Registration {
        Registration {
            username: self.username.trim().to_string(),
            email: self
                .email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            password: self.password.clone(),
        }
    }
}

/// Signed-in state of one client installation.
#[derive(Clone)]
pub struct AuthSession {
    api: Arc<dyn DecisionApi>,
    store: Arc<dyn LocalStore>,
    user: Option<StoredUser>,
}

impl AuthSession {
    pub fn new(api: Arc<dyn DecisionApi>, store: Arc<dyn LocalStore>) -> Self {
        Self {
            api,
            store,
            user: None,
        }
    }

    pub fn user(&self) -> Option<&StoredUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<StoredUser, SessionError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(SessionError::Invalid(
                "Username and password are required".to_string(),
            ));
        }

        let grant = self.api.login(username.trim(), password).await?;
        self.persist(&grant).await
    }

    pub async fn register(&mut self, form: &RegistrationForm) -> Result<StoredUser, SessionError> {
        form.validate()?;

        let grant = self.api.register(&form.to_registration()).await?;
        self.persist(&grant).await
    }

    /// Picks up a session saved by an earlier run.
    ///
    /// A token without a readable profile is treated as signed out.
    pub async fn restore(&mut self) -> Result<Option<StoredUser>, SessionError> {
        let Some(token) = self.store.get(TOKEN_KEY).await? else {
            return Ok(None);
        };

        let user = match self.store.get(USER_KEY).await? {
            Some(json) => match serde_json::from_str::<StoredUser>(&json) {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable stored user");
                    self.logout().await?;
                    return Ok(None);
                }
            },
            None => {
                self.logout().await?;
                return Ok(None);
            }
        };

        self.api.set_token(Some(token)).await;
        self.user = Some(user.clone());
        Ok(Some(user))
    }

    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.api.set_token(None).await;
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        Ok(())
    }

    async fn persist(&mut self, grant: &SessionGrant) -> Result<StoredUser, SessionError> {
        let user = StoredUser::from(grant);
        let json = serde_json::to_string(&user)
            .map_err(|e| LocalStoreError::Corrupt(e.to_string()))?;

        self.store.set(TOKEN_KEY, &grant.token).await?;
        self.store.set(USER_KEY, &json).await?;
        self.api.set_token(Some(grant.token.clone())).await;

        tracing::info!(user_id = %user.id, "signed in");
        self.user = Some(user.clone());
        Ok(user)
    }
}
