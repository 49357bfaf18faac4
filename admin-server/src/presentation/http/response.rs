use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use super::pagination::PaginationMeta;

pub(crate) const DEFAULT_OK_MESSAGE: &str = "OK";
pub(crate) const DEFAULT_CREATED_MESSAGE: &str = "Created successfully";

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SuccessEnvelope<T> {
    success: bool,
    message: String,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ResponseMeta {
    pub(crate) pagination: PaginationMeta,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiResponse<T> {
    status: StatusCode,
    body: SuccessEnvelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn new(status: StatusCode, message: &str, data: T, meta: Option<ResponseMeta>) -> Self {
        Self {
            status,
            body: SuccessEnvelope {
                success: true,
                message: message.to_string(),
                data,
                meta,
            },
        }
    }

    pub(crate) fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, DEFAULT_OK_MESSAGE, data, None)
    }

    pub(crate) fn created(data: T) -> Self {
        Self::ok(data)
            .with_status(StatusCode::CREATED)
            .with_message(DEFAULT_CREATED_MESSAGE)
    }

    pub(crate) fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = message.into();
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub(crate) fn paginated(items: Vec<T>, pagination: PaginationMeta) -> Self {
        Self::new(
            StatusCode::OK,
            DEFAULT_OK_MESSAGE,
            items,
            Some(ResponseMeta { pagination }),
        )
    }
}

impl ApiResponse<()> {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self::ok(()).with_message(message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ApiError {
    message: String,
    data: (),
    errors: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    code: &'static str,
    #[serde(rename = "type")]
    error_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    pub(crate) fn new(
        message: impl Into<String>,
        code: &'static str,
        error_type: &'static str,
        details: Option<Value>,
    ) -> Self {
        Self {
            message: message.into(),
            data: (),
            errors: ErrorBody {
                code,
                error_type,
                details,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use super::{ApiError, ApiResponse};
    use crate::presentation::http::pagination::PaginationMeta;

    async fn render<T: serde::Serialize>(response: ApiResponse<T>) -> (StatusCode, Vec<u8>) {
        let response = response.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn ok_is_byte_identical_across_calls() {
        let data = json!({ "id": 1, "name": "admin" });
        let (_, first) = render(ApiResponse::ok(data.clone())).await;
        let (_, second) = render(ApiResponse::ok(data)).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn builders_set_status_message_and_meta() {
        let (status, body) = render(ApiResponse::ok(json!([1, 2]))).await;
        let body: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "message": "OK", "data": [1, 2] }));

        let (status, body) = render(ApiResponse::created(json!({ "id": 7 }))).await;
        let body: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Created successfully");

        let (status, body) = render(ApiResponse::success("Role removed successfully")).await;
        let body: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "message": "Role removed successfully", "data": null })
        );

        let meta = PaginationMeta::new(2, 10, 25);
        let (_, body) = render(ApiResponse::paginated(vec!["a", "b"], meta)).await;
        let body: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(
            body["meta"],
            json!({ "pagination": { "page": 2, "limit": 10, "total": 25, "totalPages": 3 } })
        );
    }

    #[tokio::test]
    async fn ok_accepts_a_custom_status() {
        let (status, body) = render(
            ApiResponse::ok(json!({ "queued": true }))
                .with_status(StatusCode::ACCEPTED)
                .with_message("Export queued"),
        )
        .await;
        let body: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(
            body,
            json!({ "success": true, "message": "Export queued", "data": { "queued": true } })
        );
    }

    #[test]
    fn error_envelope_has_null_data_and_optional_details() {
        let without = serde_json::to_value(ApiError::new(
            "User not found",
            "RESOURCE_NOT_FOUND",
            "NotFoundError",
            None,
        ))
        .expect("json");
        assert_eq!(
            without,
            json!({
                "message": "User not found",
                "data": null,
                "errors": { "code": "RESOURCE_NOT_FOUND", "type": "NotFoundError" }
            })
        );

        let with = serde_json::to_value(ApiError::new(
            "Validation failed",
            "VALIDATION_ERROR",
            "ValidationError",
            Some(json!({ "root": ["bad"] })),
        ))
        .expect("json");
        assert_eq!(with["errors"]["details"]["root"][0], "bad");
    }
}
