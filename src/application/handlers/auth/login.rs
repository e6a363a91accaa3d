//! LoginHandler - Command handler for password login.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::domain::user::{AccountError, PasswordHash, User, Username};
use crate::ports::{TokenIssuer, UserRepository};

use super::AuthenticatedSession;

/// Checked when no account matches, so unknown usernames cost as much as
/// wrong passwords.
static FALLBACK_HASH: Lazy<PasswordHash> =
    Lazy::new(|| PasswordHash::create("pivot-point-no-such-user"));

/// Command to log in with a username and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// Handler for logins.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<AuthenticatedSession, AccountError> {
        if cmd.username.trim().is_empty() || cmd.password.is_empty() {
            return Err(AccountError::missing_credentials());
        }

        // An overlong name can't belong to anyone.
        let user = match Username::new(cmd.username.as_str()) {
            Ok(username) => self.users.find_by_username(&username).await?,
            Err(_) => None,
        };

        let verified = password_matches(user.as_ref(), &cmd.password);
        let user = match user {
            Some(user) if verified => user,
            _ => {
                tracing::info!(username = %cmd.username.trim(), "Login rejected");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(&user.to_authenticated()).await?;
        Ok(AuthenticatedSession { user, token })
    }
}

/// Always runs one full hash verification, whether or not the user exists.
fn password_matches(user: Option<&User>, password: &str) -> bool {
    match user {
        Some(user) => user.verify_password(password),
        None => {
            let _ = FALLBACK_HASH.verify(password);
            false
        }
    }
}
