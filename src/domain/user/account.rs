//! Account value objects: usernames, emails and the password policy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum length for usernames.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A trimmed, non-empty login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "username",
                format!("must be at most {} characters", MAX_USERNAME_LENGTH),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Username::new(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact address. Only checked loosely; delivery is never attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !trimmed.contains('@') {
            return Err(ValidationError::invalid_format("email", "must contain '@'"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Blank input means no email.
    pub fn optional(value: Option<String>) -> Result<Option<Self>, ValidationError> {
        match value {
            Some(v) if !v.trim().is_empty() => Email::new(v).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rules a new password has to satisfy.
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Rejects passwords shorter than [`MIN_PASSWORD_LENGTH`] characters.
    pub fn check(password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::invalid_format(
                "password",
                format!(
                    "Password must be at least {} characters long",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }
        Ok(())
    }

    /// Both entries of a registration form must match.
    pub fn check_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
        if password != confirmation {
            return Err(ValidationError::invalid_format(
                "confirm_password",
                "Passwords don't match",
            ));
        }
        Ok(())
    }
}
