use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use tracing::error;

use super::error_codes::ErrorCode;

pub(crate) type FieldErrors = BTreeMap<String, Vec<String>>;

pub(crate) const ROOT_FIELD: &str = "root";

pub(crate) const VALIDATION_FAILED: &str = "Validation failed";

pub(crate) const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Email is already verified")]
    EmailAlreadyVerified,
}

impl AuthError {
    pub(crate) const fn code(self) -> ErrorCode {
        match self {
            AuthError::InvalidCredentials => ErrorCode::AuthInvalidCredentials,
            AuthError::Unauthorized => ErrorCode::AuthUnauthorized,
            AuthError::Forbidden => ErrorCode::AuthForbidden,
            AuthError::TokenExpired => ErrorCode::AuthTokenExpired,
            AuthError::TokenInvalid => ErrorCode::AuthTokenInvalid,
            AuthError::EmailNotVerified => ErrorCode::AuthEmailNotVerified,
            AuthError::EmailAlreadyVerified => ErrorCode::AuthEmailAlreadyVerified,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    Internal {
        message: String,
        details: Option<Value>,
    },
}

impl DomainError {
    pub(crate) fn validation(message: impl Into<String>, mut fields: FieldErrors) -> Self {
        fields.retain(|_, messages| !messages.is_empty());
        DomainError::Validation {
            message: message.into(),
            fields,
        }
    }

    pub(crate) fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), vec![message.into()]);
        Self::validation(VALIDATION_FAILED, fields)
    }

    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
            details: None,
        }
    }

    pub(crate) fn unexpected(context: &str, cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "{context}");
        Self::internal(UNEXPECTED_ERROR_MESSAGE)
    }

    pub(crate) fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation { .. } => ErrorCode::Validation,
            DomainError::Auth(err) => err.code(),
            DomainError::NotFound { .. } => ErrorCode::ResourceNotFound,
            DomainError::Conflict(_) => ErrorCode::ResourceConflict,
            DomainError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub(crate) fn details(&self) -> Option<Value> {
        match self {
            DomainError::Validation { fields, .. } => Some(Value::Object(
                fields
                    .iter()
                    .map(|(field, messages)| {
                        let messages = messages.iter().cloned().map(Value::String).collect();
                        (field.clone(), Value::Array(messages))
                    })
                    .collect(),
            )),
            DomainError::Internal { details, .. } => details.clone(),
            _ => None,
        }
    }

    pub(crate) fn is_internal(&self) -> bool {
        matches!(self, DomainError::Internal { .. })
    }
}
