use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::domain::error::DomainError;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;

pub(crate) mod auth;
pub(crate) mod roles;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api/v1/auths", auth::router(state.clone()))
        .nest("/api/v1/users", users::router(state.clone()))
        .nest("/api/v1/roles", roles::router(state.clone()))
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn route_not_found() -> AppError {
    DomainError::not_found("Route").into()
}
