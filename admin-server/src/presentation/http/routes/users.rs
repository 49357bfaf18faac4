use axum::Router;
use axum::middleware;
use axum::routing::{delete, get};

use crate::presentation::AppState;
use crate::presentation::http::handlers::users::{
    assign_role, create_user, delete_user, get_user, get_user_roles, list_users, remove_role,
    update_user,
};
use crate::presentation::http::middleware::auth::{admin_guard, jwt_auth_middleware};

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/roles", get(get_user_roles).post(assign_role))
        .route("/{id}/roles/{role_id}", delete(remove_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_guard))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
