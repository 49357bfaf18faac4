use axum::Router;
use axum::middleware;
use axum::routing::{delete, get};

use crate::presentation::AppState;
use crate::presentation::http::handlers::roles::{
    assign_permission, create_role, delete_role, get_role, get_role_permissions, get_role_users,
    list_roles, remove_permission, update_role,
};
use crate::presentation::http::middleware::auth::{admin_guard, jwt_auth_middleware};

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/{id}", get(get_role).put(update_role).delete(delete_role))
        .route("/{id}/users", get(get_role_users))
        .route(
            "/{id}/permissions",
            get(get_role_permissions).post(assign_permission),
        )
        .route("/{id}/permissions/{permission_id}", delete(remove_permission))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_guard))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
