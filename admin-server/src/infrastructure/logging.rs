use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

pub(crate) fn init_logging(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("{log_level},sqlx=warn"))
            .or_else(|_| EnvFilter::try_new("info,sqlx=warn"))
            .context("failed to build log filter")?,
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|err| anyhow!("failed to init logging: {err}"))?;

    Ok(())
}
