use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::role_service::RoleService;
use application::user_service::UserService;
use data::repositories::postgres::{PostgresRoleRepository, PostgresUserRepository};
use data::role_repository::RoleRepository;
use data::user_repository::UserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::mailer::{LogMailer, Mailer};
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;
    info!(addr = %settings.http_addr, "starting admin-server");

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let roles: Arc<dyn RoleRepository> = Arc::new(PostgresRoleRepository::new(pool));
    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer::new(settings.app_url.clone()));

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        roles.clone(),
        jwt.clone(),
        mailer,
        Duration::hours(settings.verification_token_ttl_hours),
    ));
    let user_service = Arc::new(UserService::new(users, roles.clone()));
    let role_service = Arc::new(RoleService::new(roles));

    if let Some(seed) = &settings.seed_admin {
        auth_service
            .ensure_admin(&seed.email, &seed.password)
            .await
            .context("failed to seed admin account")?;
    }

    let state = AppState::new(
        auth_service,
        user_service,
        role_service,
        jwt,
        settings.pagination_default_limit,
    );

    server::run_http(&settings, state).await
}
