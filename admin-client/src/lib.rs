//! Клиентская библиотека для REST API admin-server.
//!
//! Предоставляет `AdminClient` поверх HTTP (`reqwest`) и разбирает оба
//! конверта ответа сервера:
//! - успешный `{ success, message, data, meta? }`
//! - ошибку `{ message, data: null, errors: { code, type, details? } }`
//!
//! Ошибки сервера приходят как [`AdminClientError::Api`] со стабильным кодом,
//! ошибки валидации доступны через [`AdminClientError::field_errors`].
//!
//! Клиент хранит JWT-токен после `register`/`login` и автоматически использует
//! его в защищённых операциях.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{AdminClientError, AdminClientResult};
pub use models::{
    ApiErrorBody, ApiErrorResponse, ApiResponse, ApiSuccessResponse, AuthResponse, FieldErrors,
    ListQuery, NewUser, Page, PaginationMeta, Profile, ResponseMeta, Role, User, UserUpdate,
    UserWithRoles,
};

use http_client::HttpClient;
use uuid::Uuid;

#[derive(Debug, Clone)]
/// Клиент административного API.
pub struct AdminClient {
    http: HttpClient,
    token: Option<String>,
}

impl AdminClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> AdminClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя и сохраняет полученный JWT-токен в клиенте.
    ///
    /// `password_confirmation` должен совпадать с `password`, иначе сервер
    /// вернёт `VALIDATION_ERROR` с ошибкой по полю `password_confirmation`.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        password_confirmation: &str,
        name: Option<&str>,
    ) -> AdminClientResult<AuthResponse> {
        let result = self
            .http
            .register(email, password, password_confirmation, name)
            .await?;
        self.token = Some(result.token.clone());
        Ok(result)
    }

    /// Выполняет вход и сохраняет полученный JWT-токен в клиенте.
    pub async fn login(&mut self, email: &str, password: &str) -> AdminClientResult<AuthResponse> {
        let result = self.http.login(email, password).await?;
        self.token = Some(result.token.clone());
        Ok(result)
    }

    /// Возвращает профиль текущего пользователя.
    pub async fn profile(&self) -> AdminClientResult<Profile> {
        self.http.profile(self.require_token()?).await
    }

    /// Подтверждает email по токену из письма.
    pub async fn verify_email(&self, verification_token: &str) -> AdminClientResult<String> {
        self.http.verify_email(verification_token).await
    }

    /// Повторно отправляет письмо с подтверждением email.
    pub async fn resend_verification(&self) -> AdminClientResult<String> {
        self.http.resend_verification(self.require_token()?).await
    }

    /// Выходит из системы и очищает сохранённый JWT-токен.
    ///
    /// Токен очищается, даже если сервер вернул ошибку.
    pub async fn signout(&mut self) -> AdminClientResult<String> {
        let result = self.http.signout().await;
        self.token = None;
        result
    }

    /// Возвращает страницу пользователей.
    ///
    /// Требует JWT администратора с подтверждённым email.
    pub async fn list_users(&self, query: &ListQuery) -> AdminClientResult<Page<User>> {
        self.http.list_users(self.require_token()?, query).await
    }

    /// Получает пользователя по идентификатору.
    pub async fn get_user(&self, id: Uuid) -> AdminClientResult<User> {
        self.http.get_user(self.require_token()?, id).await
    }

    /// Получает пользователя вместе с ролями.
    pub async fn get_user_roles(&self, id: Uuid) -> AdminClientResult<UserWithRoles> {
        self.http.get_user_roles(self.require_token()?, id).await
    }

    /// Создаёт пользователя.
    pub async fn create_user(&self, user: &NewUser) -> AdminClientResult<User> {
        self.http.create_user(self.require_token()?, user).await
    }

    /// Частично обновляет пользователя.
    pub async fn update_user(&self, id: Uuid, update: &UserUpdate) -> AdminClientResult<User> {
        self.http.update_user(self.require_token()?, id, update).await
    }

    /// Удаляет пользователя.
    pub async fn delete_user(&self, id: Uuid) -> AdminClientResult<String> {
        self.http.delete_user(self.require_token()?, id).await
    }

    /// Назначает пользователю роль.
    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> AdminClientResult<String> {
        self.http
            .assign_role(self.require_token()?, user_id, role_id)
            .await
    }

    /// Снимает с пользователя роль.
    pub async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> AdminClientResult<String> {
        self.http
            .remove_role(self.require_token()?, user_id, role_id)
            .await
    }

    /// Возвращает страницу ролей.
    pub async fn list_roles(&self, query: &ListQuery) -> AdminClientResult<Page<Role>> {
        self.http.list_roles(self.require_token()?, query).await
    }

    /// Получает роль по идентификатору.
    pub async fn get_role(&self, id: Uuid) -> AdminClientResult<Role> {
        self.http.get_role(self.require_token()?, id).await
    }

    /// Создаёт роль.
    pub async fn create_role(&self, name: &str) -> AdminClientResult<Role> {
        self.http.create_role(self.require_token()?, name).await
    }

    /// Переименовывает роль.
    pub async fn update_role(&self, id: Uuid, name: &str) -> AdminClientResult<Role> {
        self.http.update_role(self.require_token()?, id, name).await
    }

    /// Удаляет роль.
    pub async fn delete_role(&self, id: Uuid) -> AdminClientResult<String> {
        self.http.delete_role(self.require_token()?, id).await
    }

    fn require_token(&self) -> AdminClientResult<&str> {
        self.token.as_deref().ok_or(AdminClientError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn protected_calls_need_a_token() {
        let client = AdminClient::new("http://127.0.0.1:9").expect("client must build");

        let err = client
            .list_users(&ListQuery::default())
            .await
            .expect_err("call without token must fail");
        assert!(matches!(err, AdminClientError::MissingToken));
    }

    #[test]
    fn token_can_be_set_and_cleared() {
        let mut client = AdminClient::new("http://127.0.0.1:9").expect("client must build");
        assert!(client.get_token().is_none());

        client.set_token("abc");
        assert_eq!(client.get_token(), Some("abc"));

        client.clear_token();
        assert!(client.get_token().is_none());
    }

    #[test]
    fn list_query_skips_unset_fields() {
        let query = ListQuery {
            page: Some(2),
            ..ListQuery::default()
        };
        let encoded = serde_json::to_value(&query).expect("query must serialize");
        assert_eq!(encoded, serde_json::json!({ "page": 2 }));
    }
}
