use axum::extract::State;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::dto::{UserDto, UserWithRolesDto, map_all};
use crate::domain::user::{CreateUserRequest, UpdateUserRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::pagination::{PageParams, PaginationQuery};
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::validation::{UuidPath, ValidatedJson};

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct CreateUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub(crate) email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub(crate) password: String,
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub(crate) name: Option<String>,
    pub(crate) role_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateUserDto {
    #[validate(email(message = "Invalid email format"))]
    pub(crate) email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub(crate) password: Option<String>,
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct AssignRoleDto {
    pub(crate) role_id: Uuid,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated users", body = [UserDto]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden or email not verified")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    query: PaginationQuery,
) -> AppResult<ApiResponse<Vec<UserDto>>> {
    let params = PageParams::from_query(query, state.pagination_default_limit);
    let page = state.user_service.list(&params.filter()).await?;

    Ok(ApiResponse::paginated(
        map_all(page.items),
        params.meta(page.total),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
) -> AppResult<ApiResponse<UserDto>> {
    let user = state.user_service.get(id).await?;
    Ok(ApiResponse::ok(user.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/roles",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User with roles", body = UserWithRolesDto),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn get_user_roles(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
) -> AppResult<ApiResponse<UserWithRolesDto>> {
    let (user, roles) = state.user_service.get_with_roles(id).await?;
    Ok(ApiResponse::ok(UserWithRolesDto::new(user, roles)))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation error or email already exists"),
        (status = 404, description = "Role not found")
    )
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> AppResult<ApiResponse<UserDto>> {
    let req = CreateUserRequest {
        email: dto.email,
        password: dto.password,
        name: dto.name,
        role_id: dto.role_id,
    };

    let user = state.user_service.create(req).await?;
    Ok(ApiResponse::created(user.into()).with_message("User created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error or email already exists"),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> AppResult<ApiResponse<UserDto>> {
    let req = UpdateUserRequest {
        email: dto.email,
        password: dto.password,
        name: dto.name,
    };

    let user = state.user_service.update(id, req).await?;
    Ok(ApiResponse::ok(user.into()).with_message("User updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.delete(id).await?;
    Ok(ApiResponse::success("User deleted successfully"))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/roles",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = AssignRoleDto,
    responses(
        (status = 200, description = "Role assigned"),
        (status = 404, description = "User or role not found")
    )
)]
pub(crate) async fn assign_role(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
    ValidatedJson(dto): ValidatedJson<AssignRoleDto>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.assign_role(id, dto.role_id).await?;
    Ok(ApiResponse::success("Role assigned successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/roles/{role_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User id"),
        ("role_id" = Uuid, Path, description = "Role id")
    ),
    responses(
        (status = 200, description = "Role removed"),
        (status = 404, description = "User or role not found")
    )
)]
pub(crate) async fn remove_role(
    State(state): State<AppState>,
    UuidPath([id, role_id]): UuidPath<2>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.remove_role(id, role_id).await?;
    Ok(ApiResponse::success("Role removed successfully"))
}
