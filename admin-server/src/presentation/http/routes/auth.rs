use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::auth::{
    login, profile, register, resend_verification, signout, verify_email,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify-email", get(verify_email))
        .route("/signout", get(signout));

    let protected = Router::new()
        .route("/profile", get(profile))
        .route("/resend-verification", post(resend_verification))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
