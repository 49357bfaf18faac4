use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use uuid::Uuid;

use crate::error::{AdminClientError, AdminClientResult};
use crate::models::{
    ApiResponse, ApiSuccessResponse, AuthResponse, ListQuery, NewUser, Page, Profile, Role, User,
    UserUpdate, UserWithRoles,
};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    email: &'a str,
    password: &'a str,
    password_confirmation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct AssignRoleRequestDto {
    role_id: Uuid,
}

#[derive(Debug, Serialize)]
struct RoleNameRequestDto<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyEmailQuery<'a> {
    token: &'a str,
}

const NO_BODY: Option<&()> = None;

/// Разбирает тело ответа в один из двух конвертов.
///
/// Успешный конверт возвращается как есть, конверт ошибки превращается
/// в [`AdminClientError::Api`], всё остальное в
/// [`AdminClientError::UnexpectedBody`].
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> AdminClientResult<ApiSuccessResponse<T>> {
    let parsed = serde_json::from_str::<ApiResponse<T>>(body).map_err(|err| {
        AdminClientError::UnexpectedBody {
            status: status.as_u16(),
            reason: err.to_string(),
        }
    })?;

    match parsed {
        ApiResponse::Success(success) => Ok(success),
        ApiResponse::Failure(failure) => Err(AdminClientError::from_failure(
            status.as_u16(),
            failure,
        )),
    }
}

fn into_page<T>(envelope: ApiSuccessResponse<Vec<T>>) -> AdminClientResult<Page<T>> {
    let pagination = envelope
        .meta
        .and_then(|meta| meta.pagination)
        .ok_or_else(|| AdminClientError::UnexpectedBody {
            status: StatusCode::OK.as_u16(),
            reason: "list response has no pagination meta".to_string(),
        })?;

    Ok(Page {
        items: envelope.data,
        pagination,
    })
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `admin-server` (`/api/v1`).
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> AdminClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// универсальный helper: отправляет запрос и разбирает конверт ответа
    async fn send<TQuery, TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        query: Option<&TQuery>,
        body: Option<&TReq>,
        token: Option<&str>,
    ) -> AdminClientResult<ApiSuccessResponse<TRes>>
    where
        TQuery: Serialize + ?Sized,
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);

        let mut request = self.client.request(method, url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        decode_envelope(status, &text)
    }

    async fn get<TRes: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> AdminClientResult<ApiSuccessResponse<TRes>> {
        self.send::<(), (), TRes>(Method::GET, path, None, NO_BODY, token)
            .await
    }

    async fn send_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> AdminClientResult<ApiSuccessResponse<TRes>> {
        self.send::<(), TReq, TRes>(method, path, None, Some(body), token)
            .await
    }

    async fn list<TRes: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        query: &ListQuery,
    ) -> AdminClientResult<Page<TRes>> {
        let envelope = self
            .send::<ListQuery, (), Vec<TRes>>(Method::GET, path, Some(query), NO_BODY, Some(token))
            .await?;
        into_page(envelope)
    }

    async fn delete(&self, path: &str, token: &str) -> AdminClientResult<String> {
        let envelope = self
            .send::<(), (), ()>(Method::DELETE, path, None, NO_BODY, Some(token))
            .await?;
        Ok(envelope.message)
    }

    /// Регистрирует пользователя и возвращает JWT + данные пользователя.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirmation: &str,
        name: Option<&str>,
    ) -> AdminClientResult<AuthResponse> {
        let payload = RegisterRequestDto {
            email,
            password,
            password_confirmation,
            name,
        };
        let envelope = self
            .send_json(Method::POST, "/api/v1/auths/register", &payload, None)
            .await?;
        Ok(envelope.data)
    }

    /// Выполняет вход и возвращает JWT + данные пользователя.
    pub async fn login(&self, email: &str, password: &str) -> AdminClientResult<AuthResponse> {
        let payload = LoginRequestDto { email, password };
        let envelope = self
            .send_json(Method::POST, "/api/v1/auths/login", &payload, None)
            .await?;
        Ok(envelope.data)
    }

    /// Возвращает профиль текущего пользователя.
    pub async fn profile(&self, token: &str) -> AdminClientResult<Profile> {
        let envelope = self.get("/api/v1/auths/profile", Some(token)).await?;
        Ok(envelope.data)
    }

    /// Подтверждает email по токену из письма. Возвращает сообщение сервера.
    pub async fn verify_email(&self, verification_token: &str) -> AdminClientResult<String> {
        let query = VerifyEmailQuery {
            token: verification_token,
        };
        let envelope = self
            .send::<VerifyEmailQuery<'_>, (), ()>(
                Method::GET,
                "/api/v1/auths/verify-email",
                Some(&query),
                NO_BODY,
                None,
            )
            .await?;
        Ok(envelope.message)
    }

    /// Повторно отправляет письмо с подтверждением email.
    pub async fn resend_verification(&self, token: &str) -> AdminClientResult<String> {
        let envelope = self
            .send::<(), (), ()>(
                Method::POST,
                "/api/v1/auths/resend-verification",
                None,
                NO_BODY,
                Some(token),
            )
            .await?;
        Ok(envelope.message)
    }

    /// Завершает сессию на сервере. Возвращает сообщение сервера.
    pub async fn signout(&self) -> AdminClientResult<String> {
        let envelope = self.get::<()>("/api/v1/auths/signout", None).await?;
        Ok(envelope.message)
    }

    /// Возвращает страницу пользователей.
    ///
    /// Требует JWT администратора.
    pub async fn list_users(&self, token: &str, query: &ListQuery) -> AdminClientResult<Page<User>> {
        self.list("/api/v1/users", token, query).await
    }

    /// Получает пользователя по идентификатору.
    pub async fn get_user(&self, token: &str, id: Uuid) -> AdminClientResult<User> {
        let envelope = self.get(&format!("/api/v1/users/{id}"), Some(token)).await?;
        Ok(envelope.data)
    }

    /// Получает пользователя вместе с его ролями.
    pub async fn get_user_roles(&self, token: &str, id: Uuid) -> AdminClientResult<UserWithRoles> {
        let envelope = self
            .get(&format!("/api/v1/users/{id}/roles"), Some(token))
            .await?;
        Ok(envelope.data)
    }

    /// Создаёт пользователя.
    pub async fn create_user(&self, token: &str, user: &NewUser) -> AdminClientResult<User> {
        let envelope = self
            .send_json(Method::POST, "/api/v1/users", user, Some(token))
            .await?;
        Ok(envelope.data)
    }

    /// Частично обновляет пользователя.
    pub async fn update_user(
        &self,
        token: &str,
        id: Uuid,
        update: &UserUpdate,
    ) -> AdminClientResult<User> {
        let envelope = self
            .send_json(
                Method::PUT,
                &format!("/api/v1/users/{id}"),
                update,
                Some(token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Удаляет пользователя. Возвращает сообщение сервера.
    pub async fn delete_user(&self, token: &str, id: Uuid) -> AdminClientResult<String> {
        self.delete(&format!("/api/v1/users/{id}"), token).await
    }

    /// Назначает пользователю роль.
    pub async fn assign_role(
        &self,
        token: &str,
        user_id: Uuid,
        role_id: Uuid,
    ) -> AdminClientResult<String> {
        let payload = AssignRoleRequestDto { role_id };
        let envelope = self
            .send_json::<_, ()>(
                Method::POST,
                &format!("/api/v1/users/{user_id}/roles"),
                &payload,
                Some(token),
            )
            .await?;
        Ok(envelope.message)
    }

    /// Снимает с пользователя роль.
    pub async fn remove_role(
        &self,
        token: &str,
        user_id: Uuid,
        role_id: Uuid,
    ) -> AdminClientResult<String> {
        self.delete(&format!("/api/v1/users/{user_id}/roles/{role_id}"), token)
            .await
    }

    /// Возвращает страницу ролей.
    pub async fn list_roles(&self, token: &str, query: &ListQuery) -> AdminClientResult<Page<Role>> {
        self.list("/api/v1/roles", token, query).await
    }

    /// Получает роль по идентификатору.
    pub async fn get_role(&self, token: &str, id: Uuid) -> AdminClientResult<Role> {
        let envelope = self.get(&format!("/api/v1/roles/{id}"), Some(token)).await?;
        Ok(envelope.data)
    }

    /// Создаёт роль.
    pub async fn create_role(&self, token: &str, name: &str) -> AdminClientResult<Role> {
        let payload = RoleNameRequestDto { name };
        let envelope = self
            .send_json(Method::POST, "/api/v1/roles", &payload, Some(token))
            .await?;
        Ok(envelope.data)
    }

    /// Переименовывает роль.
    pub async fn update_role(&self, token: &str, id: Uuid, name: &str) -> AdminClientResult<Role> {
        let payload = RoleNameRequestDto { name };
        let envelope = self
            .send_json(
                Method::PUT,
                &format!("/api/v1/roles/{id}"),
                &payload,
                Some(token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Удаляет роль.
    pub async fn delete_role(&self, token: &str, id: Uuid) -> AdminClientResult<String> {
        self.delete(&format!("/api/v1/roles/{id}"), token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client must build");
        let full = client.endpoint("/api/v1/users");
        assert_eq!(full, "http://localhost:8080/api/v1/users");
    }

    #[test]
    fn decode_envelope_maps_validation_failure() {
        let body = json!({
            "message": "Validation failed",
            "data": null,
            "errors": {
                "code": "VALIDATION_ERROR",
                "type": "ValidationError",
                "details": { "password_confirmation": ["Passwords do not match"] }
            }
        })
        .to_string();

        let err = decode_envelope::<AuthResponse>(StatusCode::BAD_REQUEST, &body)
            .expect_err("failure envelope must become an error");

        assert_eq!(err.code(), Some("VALIDATION_ERROR"));
        let fields = err.field_errors().expect("details must be a field map");
        assert_eq!(
            fields.get("password_confirmation"),
            Some(&vec!["Passwords do not match".to_string()])
        );
        match err {
            AdminClientError::Api { status, .. } => assert_eq!(status, 400),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_envelope_reads_paginated_list() {
        let body = json!({
            "success": true,
            "message": "Success",
            "data": [],
            "meta": { "pagination": { "page": 1, "limit": 10, "total": 0, "totalPages": 0 } }
        })
        .to_string();

        let envelope = decode_envelope::<Vec<User>>(StatusCode::OK, &body)
            .expect("success envelope must decode");
        let page = into_page(envelope).expect("pagination meta must be present");

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.display_total_pages(), 1);
    }

    #[test]
    fn decode_envelope_accepts_null_data_for_messages() {
        let body = json!({
            "success": true,
            "message": "User deleted successfully",
            "data": null
        })
        .to_string();

        let envelope =
            decode_envelope::<()>(StatusCode::OK, &body).expect("null data must decode");
        assert_eq!(envelope.message, "User deleted successfully");
        assert!(envelope.meta.is_none());
    }

    #[test]
    fn decode_envelope_rejects_foreign_body() {
        let err = decode_envelope::<User>(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
            .expect_err("non-json body must fail");
        match err {
            AdminClientError::UnexpectedBody { status, .. } => assert_eq!(status, 502),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn list_without_meta_is_unexpected() {
        let envelope = ApiSuccessResponse::<Vec<User>> {
            success: true,
            message: "Success".to_string(),
            data: vec![],
            meta: None,
        };
        assert!(matches!(
            into_page(envelope),
            Err(AdminClientError::UnexpectedBody { .. })
        ));
    }
}
