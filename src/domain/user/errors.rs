//! Account-specific error types.

use thiserror::Error;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};

/// Errors raised while registering or logging in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Username or email already exists")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl AccountError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Raised when either login field is blank.
    pub fn missing_credentials() -> Self {
        Self::validation("username", "Username and password are required")
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::UsernameTaken => ErrorCode::UsernameTaken,
            AccountError::InvalidCredentials => ErrorCode::Unauthorized,
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        let message = match &err {
            // Policy messages are already user-facing sentences.
            ValidationError::InvalidFormat { field, reason }
                if field == "password" || field == "confirm_password" =>
            {
                reason.clone()
            }
            _ => err.to_string(),
        };
        AccountError::ValidationFailed {
            field: err.field().to_string(),
            message,
        }
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UsernameTaken => AccountError::UsernameTaken,
            ErrorCode::ValidationFailed => AccountError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        AccountError::Infrastructure(err.to_string())
    }
}
