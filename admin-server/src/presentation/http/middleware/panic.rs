use std::any::Any;

use anyhow::anyhow;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::presentation::http::app_error::AppError;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

pub(crate) fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(render_panic as PanicHandler)
}

fn render_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    AppError::from(anyhow!("handler panicked: {detail}")).into_response()
}
