#![allow(dead_code)]

use axum::routing::{get, post};
use axum::{Extension, Router, middleware};
use request_json_logger::api::handlers::{
    create_session_handler, health_handler, panic_handler, show_order_handler,
};
use request_json_logger::api::middleware::{catch_panic, request_log};
use request_json_logger::prelude::*;
use std::sync::Arc;

pub fn test_logger(options: LogOptions, filter: FilterConfig) -> (RequestLogger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = RequestLogger::new(options, filter, sink.clone());
    (logger, sink)
}

/// Responds with an upload descriptor among the logged params.
pub async fn upload_handler() -> (Extension<LoggedParams>, &'static str) {
    let mut params = Params::new();
    params.insert(
        "avatar".to_string(),
        UploadedFile::new(Some("image/png"), Some("me.png"), Some("/tmp/plug-1")).into(),
    );
    (Extension(LoggedParams(params)), "stored")
}

pub fn test_router(logger: RequestLogger) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/health", get(health_handler))
        .route("/orders/{id}", get(show_order_handler))
        .route("/login", post(create_session_handler))
        .route("/upload", post(upload_handler))
        .route("/panic", get(panic_handler))
        .layer(catch_panic::layer(logger.clone()))
        .layer(middleware::from_fn_with_state(logger, request_log::layer))
}
