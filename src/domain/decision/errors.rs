//! Decision-specific error types.

use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, ItemId, ValidationError};

/// Decision-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    /// Decision was not found.
    NotFound(DecisionId),
    /// Item was not found.
    ItemNotFound(ItemId),
    /// User is not authorized.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl DecisionError {
    pub fn not_found(id: DecisionId) -> Self {
        DecisionError::NotFound(id)
    }
    pub fn item_not_found(id: ItemId) -> Self {
        DecisionError::ItemNotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DecisionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        DecisionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::NotFound(_) => ErrorCode::DecisionNotFound,
            DecisionError::ItemNotFound(_) => ErrorCode::ItemNotFound,
            DecisionError::Forbidden => ErrorCode::Forbidden,
            DecisionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DecisionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            DecisionError::NotFound(_) => "Decision not found".to_string(),
            DecisionError::ItemNotFound(_) => "Item not found".to_string(),
            DecisionError::Forbidden => "Permission denied".to_string(),
            DecisionError::ValidationFailed { message, .. } => message.clone(),
            DecisionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for DecisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DecisionError {}

impl From<DomainError> for DecisionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => DecisionError::Forbidden,
            ErrorCode::ValidationFailed => DecisionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => DecisionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for DecisionError {
    fn from(err: ValidationError) -> Self {
        match &err {
            // Keeps the wording the web client shows for a blank item.
            ValidationError::EmptyField { field } if field == "text" => {
                DecisionError::validation("text", "Text is required")
            }
            _ => DecisionError::validation(err.field().to_string(), err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(
            DecisionError::not_found(DecisionId::from_raw(1)).code(),
            ErrorCode::DecisionNotFound
        );
        assert_eq!(DecisionError::Forbidden.code(), ErrorCode::Forbidden);
        assert_eq!(
            DecisionError::infrastructure("db down").code(),
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn blank_text_maps_to_text_required() {
        let err: DecisionError = ValidationError::empty_field("text").into();
        assert_eq!(err.message(), "Text is required");
    }

    #[test]
    fn forbidden_domain_error_maps_to_forbidden() {
        let err: DecisionError = DomainError::new(ErrorCode::Forbidden, "nope").into();
        assert_eq!(err, DecisionError::Forbidden);
    }

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: DecisionError = DomainError::validation("title", "too long").into();
        assert_eq!(
            err,
            DecisionError::ValidationFailed {
                field: "title".to_string(),
                message: "too long".to_string()
            }
        );
    }
}
