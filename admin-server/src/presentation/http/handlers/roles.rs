use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::dto::{PermissionDto, RoleDto, UserDto, map_all};
use crate::domain::role::{CreateRoleRequest, UpdateRoleRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::pagination::{PageParams, PaginationQuery};
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::validation::{UuidPath, ValidatedJson};

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct CreateRoleDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub(crate) name: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateRoleDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct AssignPermissionDto {
    pub(crate) permission_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RoleWithUsersDto {
    #[serde(flatten)]
    pub(crate) role: RoleDto,
    pub(crate) users: Vec<UserDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RoleWithPermissionsDto {
    #[serde(flatten)]
    pub(crate) role: RoleDto,
    pub(crate) permissions: Vec<PermissionDto>,
}

#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated roles", body = [RoleDto]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden or email not verified")
    )
)]
pub(crate) async fn list_roles(
    State(state): State<AppState>,
    query: PaginationQuery,
) -> AppResult<ApiResponse<Vec<RoleDto>>> {
    let params = PageParams::from_query(query, state.pagination_default_limit);
    let page = state.role_service.list(&params.filter()).await?;

    Ok(ApiResponse::paginated(
        map_all(page.items),
        params.meta(page.total),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role found", body = RoleDto),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Role not found")
    )
)]
pub(crate) async fn get_role(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
) -> AppResult<ApiResponse<RoleDto>> {
    let role = state.role_service.get(id).await?;
    Ok(ApiResponse::ok(role.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}/users",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role with its users", body = RoleWithUsersDto),
        (status = 404, description = "Role not found")
    )
)]
pub(crate) async fn get_role_users(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
) -> AppResult<ApiResponse<RoleWithUsersDto>> {
    let (role, users) = state.role_service.with_users(id).await?;
    Ok(ApiResponse::ok(RoleWithUsersDto {
        role: role.into(),
        users: map_all(users),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}/permissions",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role with its permissions", body = RoleWithPermissionsDto),
        (status = 404, description = "Role not found")
    )
)]
pub(crate) async fn get_role_permissions(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
) -> AppResult<ApiResponse<RoleWithPermissionsDto>> {
    let (role, permissions) = state.role_service.with_permissions(id).await?;
    Ok(ApiResponse::ok(RoleWithPermissionsDto {
        role: role.into(),
        permissions: map_all(permissions),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = RoleDto),
        (status = 400, description = "Validation error or name already exists")
    )
)]
pub(crate) async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> AppResult<ApiResponse<RoleDto>> {
    let role = state
        .role_service
        .create(CreateRoleRequest { name: dto.name })
        .await?;
    Ok(ApiResponse::created(role.into()).with_message("Role created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = RoleDto),
        (status = 400, description = "Validation error or name already exists"),
        (status = 404, description = "Role not found")
    )
)]
pub(crate) async fn update_role(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> AppResult<ApiResponse<RoleDto>> {
    let role = state
        .role_service
        .update(id, UpdateRoleRequest { name: dto.name })
        .await?;
    Ok(ApiResponse::ok(role.into()).with_message("Role updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role deleted"),
        (status = 404, description = "Role not found")
    )
)]
pub(crate) async fn delete_role(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
) -> AppResult<ApiResponse<()>> {
    state.role_service.delete(id).await?;
    Ok(ApiResponse::success("Role deleted successfully"))
}

#[utoipa::path(
    post,
    path = "/api/v1/roles/{id}/permissions",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Role id")),
    request_body = AssignPermissionDto,
    responses(
        (status = 200, description = "Permission assigned"),
        (status = 404, description = "Role or permission not found")
    )
)]
pub(crate) async fn assign_permission(
    State(state): State<AppState>,
    UuidPath([id]): UuidPath<1>,
    ValidatedJson(dto): ValidatedJson<AssignPermissionDto>,
) -> AppResult<ApiResponse<()>> {
    state
        .role_service
        .assign_permission(id, dto.permission_id)
        .await?;
    Ok(ApiResponse::success("Permission assigned successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}/permissions/{permission_id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Role id"),
        ("permission_id" = Uuid, Path, description = "Permission id")
    ),
    responses(
        (status = 200, description = "Permission removed"),
        (status = 404, description = "Role or permission not found")
    )
)]
pub(crate) async fn remove_permission(
    State(state): State<AppState>,
    UuidPath([id, permission_id]): UuidPath<2>,
) -> AppResult<ApiResponse<()>> {
    state
        .role_service
        .remove_permission(id, permission_id)
        .await?;
    Ok(ApiResponse::success("Permission removed successfully"))
}
