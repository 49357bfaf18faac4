use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Ответ сервера в одном из двух конвертов.
///
/// Успешный конверт всегда содержит `success: true`, конверт ошибки содержит
/// `errors` и `data: null`, поэтому форма определяется однозначно.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    /// Успешный ответ.
    Success(ApiSuccessResponse<T>),
    /// Ответ с ошибкой.
    Failure(ApiErrorResponse),
}

impl<T> ApiResponse<T> {
    /// `true`, если сервер вернул успешный конверт.
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    /// `true`, если сервер вернул конверт ошибки.
    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Failure(_))
    }
}

/// Успешный конверт: `{ success, message, data, meta? }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSuccessResponse<T> {
    /// Всегда `true`.
    pub success: bool,
    /// Человекочитаемое сообщение.
    pub message: String,
    /// Полезная нагрузка.
    pub data: T,
    /// Метаданные (пагинация для списков).
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
}

/// Блок `meta` успешного ответа.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMeta {
    /// Пагинация, если ответ является страницей списка.
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

/// Метаданные пагинации.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationMeta {
    /// Номер страницы, начиная с 1.
    pub page: u32,
    /// Размер страницы (1..=100).
    pub limit: u32,
    /// Общее количество записей.
    pub total: u64,
    /// `ceil(total / limit)`; `0` для пустой выборки.
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Количество страниц для отображения: пустая выборка показывается
    /// как «страница 1 из 1», а не «0 из 0».
    pub fn display_total_pages(&self) -> u64 {
        self.total_pages.max(1)
    }
}

/// Конверт ошибки: `{ message, data: null, errors }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Человекочитаемое сообщение.
    pub message: String,
    /// Всегда `null`.
    pub data: Option<Value>,
    /// Машиночитаемое описание ошибки.
    pub errors: ApiErrorBody,
}

/// Тело `errors` конверта ошибки.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Стабильный код ошибки, например `VALIDATION_ERROR`.
    pub code: String,
    /// Тип ошибки, например `ValidationError`.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Детали; для ошибок валидации это карта «поле → сообщения».
    #[serde(default)]
    pub details: Option<Value>,
}

/// Ошибки валидации по полям.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Публичная модель пользователя.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Идентификатор пользователя.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Имя, если задано.
    pub name: Option<String>,
    /// Момент подтверждения email.
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления (UTC).
    pub updated_at: DateTime<Utc>,
}

/// Публичная модель роли.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Идентификатор роли.
    pub id: Uuid,
    /// Уникальное имя роли.
    pub name: String,
    /// Назначается ли роль новым пользователям автоматически.
    pub is_default: bool,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления (UTC).
    pub updated_at: DateTime<Utc>,
}

/// Пользователь вместе с его ролями.
#[derive(Debug, Clone, Deserialize)]
pub struct UserWithRoles {
    /// Данные пользователя.
    #[serde(flatten)]
    pub user: User,
    /// Роли пользователя.
    pub roles: Vec<Role>,
}

/// Профиль текущего пользователя.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// Пользователь и его роли.
    #[serde(flatten)]
    pub user: UserWithRoles,
    /// Подтверждён ли email.
    pub email_verified: bool,
}

/// Ответ после успешной регистрации или входа.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Данные пользователя.
    pub user: User,
    /// JWT access token.
    pub token: String,
    /// Подтверждён ли email.
    pub email_verified: bool,
}

/// Страница списка вместе с метаданными пагинации.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Элементы текущей страницы.
    pub items: Vec<T>,
    /// Метаданные пагинации.
    pub pagination: PaginationMeta,
}

/// Параметры списка: страница, размер страницы и строка поиска.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListQuery {
    /// Номер страницы (по умолчанию 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Размер страницы (по умолчанию задаётся сервером).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Строка поиска.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Данные для создания пользователя администратором.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewUser {
    /// Email.
    pub email: String,
    /// Пароль (не короче 6 символов).
    pub password: String,
    /// Имя.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Роль, которую нужно сразу назначить.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Uuid>,
}

/// Частичное обновление пользователя; `None` оставляет поле без изменений.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    /// Новый email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Новый пароль.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Новое имя.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
