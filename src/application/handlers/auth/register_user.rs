//! RegisterUserHandler - Command handler for creating accounts.

use std::sync::Arc;

use crate::domain::user::{AccountError, Email, NewUser, PasswordHash, PasswordPolicy, User, Username};
use crate::ports::{TokenIssuer, UserRepository};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

/// A signed-in account: the user plus a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
}

/// Handler for registering accounts.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<AuthenticatedSession, AccountError> {
        if cmd.username.trim().is_empty() || cmd.password.is_empty() {
            return Err(AccountError::missing_credentials());
        }

        let username = Username::new(cmd.username)?;
        let email = Email::optional(cmd.email)?;
        PasswordPolicy::check(&cmd.password)?;

        let new_user = NewUser::new(username, email, PasswordHash::create(&cmd.password));
        let user = self.users.create(&new_user).await?;
        let token = self.tokens.issue(&user.to_authenticated()).await?;

        tracing::info!(user_id = %user.id(), username = %user.username(), "User registered");
        Ok(AuthenticatedSession { user, token })
    }
}
