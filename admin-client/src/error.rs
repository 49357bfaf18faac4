use serde_json::Value;
use thiserror::Error;

use crate::models::{ApiErrorResponse, FieldErrors};

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `admin-client`.
pub enum AdminClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер вернул конверт ошибки.
    #[error("api error {status} {code}: {message}")]
    Api {
        /// HTTP-статус ответа.
        status: u16,
        /// Стабильный код ошибки (`errors.code`).
        code: String,
        /// Тип ошибки (`errors.type`).
        error_type: String,
        /// Сообщение (`message`).
        message: String,
        /// Детали (`errors.details`), если есть.
        details: Option<Value>,
    },

    /// Тело ответа не совпало ни с одним из конвертов.
    #[error("unexpected response body (status {status}): {reason}")]
    UnexpectedBody {
        /// HTTP-статус ответа.
        status: u16,
        /// Причина ошибки разбора.
        reason: String,
    },

    /// Операция требует JWT-токен, но он не установлен.
    #[error("not authenticated: call login or set_token first")]
    MissingToken,
}

/// Результат операций `admin-client`.
pub type AdminClientResult<T> = Result<T, AdminClientError>;

impl AdminClientError {
    pub(crate) fn from_failure(status: u16, failure: ApiErrorResponse) -> Self {
        Self::Api {
            status,
            code: failure.errors.code,
            error_type: failure.errors.error_type,
            message: failure.message,
            details: failure.errors.details,
        }
    }

    /// Код ошибки сервера, если это ошибка API.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Карта ошибок валидации «поле → сообщения», если сервер её вернул.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Api {
                details: Some(details),
                ..
            } => serde_json::from_value(details.clone()).ok(),
            _ => None,
        }
    }
}
