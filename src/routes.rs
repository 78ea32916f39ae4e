//! Router of the demo server.
//!
//! # Route Structure
//!
//! - `GET  /health`       - Liveness
//! - `GET  /orders/{id}`  - Tagged as `Orders#show`
//! - `POST /login`        - Body contributed as (filtered) params
//! - `GET  /panic`        - Always panics
//!
//! # Middleware
//!
//! - **Request log** - One JSON record per request (outermost)
//! - **Catch panic** - Error record plus `500` for panicking handlers
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    create_session_handler, health_handler, panic_handler, show_order_handler,
};
use crate::api::middleware::{catch_panic, request_log};
use crate::application::RequestLogger;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the demo router wrapped in the logging middleware.
pub fn app_router(logger: RequestLogger) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/orders/{id}", get(show_order_handler))
        .route("/login", post(create_session_handler))
        .route("/panic", get(panic_handler))
        .layer(catch_panic::layer(logger.clone()))
        .layer(middleware::from_fn_with_state(logger, request_log::layer));

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
