use anyhow::Context;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http::middleware::cors::cors_layer;
use crate::presentation::http::middleware::panic::catch_panic_layer;
use crate::presentation::http::middleware::trace::trace_layer;
use crate::presentation::http::openapi::ApiDoc;
use crate::presentation::http::routes;

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_app(settings, state)?;

    let listener = TcpListener::bind(&settings.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.http_addr))?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub(crate) fn build_app(settings: &Settings, state: AppState) -> anyhow::Result<Router> {
    apply_middleware(build_router(state), settings)
}

pub(crate) fn apply_middleware(router: Router, settings: &Settings) -> anyhow::Result<Router> {
    let app = router
        .layer(catch_panic_layer())
        .layer(DefaultBodyLimit::max(settings.http_request_body_limit_bytes))
        .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
        .layer(trace_layer())
        .layer(cors_layer(&settings.cors_origins)?);
    Ok(app)
}

pub(crate) fn build_router(state: AppState) -> Router {
    routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
