use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::error::{AuthError, DomainError, UNEXPECTED_ERROR_MESSAGE};
use crate::domain::error_codes::{self, ErrorCode};
use crate::presentation::http::response::ApiError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("unexpected error: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Domain(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message, details) = match self {
            AppError::Domain(err) => {
                let code = err.code();
                if err.is_internal() {
                    error!(code = %code, error = %err, "request failed");
                } else {
                    warn!(code = %code, error = %err, "request rejected");
                }
                let details = err.details();
                (code, err.to_string(), details)
            }
            AppError::Unexpected(err) => {
                error!(error = ?err, "unhandled error while processing request");
                (ErrorCode::Internal, UNEXPECTED_ERROR_MESSAGE.to_string(), None)
            }
        };

        render(code, message, details)
    }
}

fn render(code: ErrorCode, message: String, details: Option<Value>) -> Response {
    let status = status_of(code);
    let body = ApiError::new(
        message,
        code.as_str(),
        error_codes::type_name(code.as_str()),
        details,
    );
    (status, body).into_response()
}

fn status_of(code: ErrorCode) -> StatusCode {
    StatusCode::from_u16(error_codes::http_status(code.as_str()))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
