use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::auth::{
    AuthResponseDto, LoginDto, ProfileDto, RegisterDto,
};
use crate::presentation::http::handlers::dto::{
    PermissionDto, RoleDto, UserDto, UserWithRolesDto,
};
use crate::presentation::http::handlers::roles::{
    AssignPermissionDto, CreateRoleDto, RoleWithPermissionsDto, RoleWithUsersDto, UpdateRoleDto,
};
use crate::presentation::http::handlers::users::{AssignRoleDto, CreateUserDto, UpdateUserDto};
use crate::presentation::http::pagination::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::auth::register,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::auth::profile,
        crate::presentation::http::handlers::auth::verify_email,
        crate::presentation::http::handlers::auth::resend_verification,
        crate::presentation::http::handlers::auth::signout,
        crate::presentation::http::handlers::users::list_users,
        crate::presentation::http::handlers::users::get_user,
        crate::presentation::http::handlers::users::get_user_roles,
        crate::presentation::http::handlers::users::create_user,
        crate::presentation::http::handlers::users::update_user,
        crate::presentation::http::handlers::users::delete_user,
        crate::presentation::http::handlers::users::assign_role,
        crate::presentation::http::handlers::users::remove_role,
        crate::presentation::http::handlers::roles::list_roles,
        crate::presentation::http::handlers::roles::get_role,
        crate::presentation::http::handlers::roles::get_role_users,
        crate::presentation::http::handlers::roles::get_role_permissions,
        crate::presentation::http::handlers::roles::create_role,
        crate::presentation::http::handlers::roles::update_role,
        crate::presentation::http::handlers::roles::delete_role,
        crate::presentation::http::handlers::roles::assign_permission,
        crate::presentation::http::handlers::roles::remove_permission
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            AuthResponseDto,
            ProfileDto,
            UserDto,
            UserWithRolesDto,
            RoleDto,
            PermissionDto,
            RoleWithUsersDto,
            RoleWithPermissionsDto,
            CreateUserDto,
            UpdateUserDto,
            AssignRoleDto,
            CreateRoleDto,
            UpdateRoleDto,
            AssignPermissionDto,
            PaginationMeta
        )
    ),
    tags(
        (name = "auths", description = "Registration, login and email verification"),
        (name = "users", description = "User management (admin only)"),
        (name = "roles", description = "Role and permission management (admin only)")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
