use anyhow::{Context, Result, anyhow};

use crate::presentation::http::pagination::{DEFAULT_LIMIT, MAX_LIMIT};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub http_addr: String,
    pub app_url: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub pagination_default_limit: u32,
    pub verification_token_ttl_hours: i64,
    pub seed_admin: Option<SeedAdmin>,
}

#[derive(Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_url = get_required("DATABASE_URL").context("DATABASE_URL is required")?;
        let jwt_secret = get_required("JWT_SECRET").context("JWT_SECRET is required")?;
        let jwt_ttl_seconds: i64 = std::env::var("JWT_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;

        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let app_url =
            std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_positive_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_positive_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let pagination_default_limit =
            parse_positive_env("PAGINATION_DEFAULT_LIMIT", DEFAULT_LIMIT)?;
        if pagination_default_limit > MAX_LIMIT {
            return Err(anyhow!("PAGINATION_DEFAULT_LIMIT must be <= {MAX_LIMIT}"));
        }
        let verification_token_ttl_hours = parse_positive_env("VERIFICATION_TOKEN_TTL_HOURS", 24)?;
        let seed_admin = parse_seed_admin(
            std::env::var("SEED_ADMIN_EMAIL").ok(),
            std::env::var("SEED_ADMIN_PASSWORD").ok(),
        )?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            app_url,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            pagination_default_limit,
            verification_token_ttl_hours,
            seed_admin,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + ToString + PartialOrd + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value <= T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_seed_admin(email: Option<String>, password: Option<String>) -> Result<Option<SeedAdmin>> {
    let email = email.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let password = password.filter(|v| !v.is_empty());
    match (email, password) {
        (Some(email), Some(password)) => Ok(Some(SeedAdmin { email, password })),
        (None, None) => Ok(None),
        _ => Err(anyhow!(
            "SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD must be set together"
        )),
    }
}
