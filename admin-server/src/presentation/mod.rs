use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::role_service::RoleService;
use crate::application::user_service::UserService;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) user_service: Arc<UserService>,
    pub(crate) role_service: Arc<RoleService>,
    pub(crate) jwt: Arc<JwtService>,
    pub(crate) pagination_default_limit: u32,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService>,
        user_service: Arc<UserService>,
        role_service: Arc<RoleService>,
        jwt: Arc<JwtService>,
        pagination_default_limit: u32,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            role_service,
            jwt,
            pagination_default_limit,
        }
    }
}
