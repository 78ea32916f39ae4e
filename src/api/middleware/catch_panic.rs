//! Converts handler panics into error records and `500` responses.

use axum::{
    Json,
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
};
use serde_json::json;
use std::any::Any;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use super::request_log::current_request_id;
use crate::application::RequestLogger;

/// Panic handler that reports through a [`RequestLogger`].
#[derive(Debug, Clone)]
pub struct LogPanic {
    logger: RequestLogger,
}

impl ResponseForPanic for LogPanic {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let reason = panic_message(err.as_ref());
        let request_id = current_request_id();
        if let Err(e) = self
            .logger
            .log_error("panic", &reason, None, request_id.as_deref())
        {
            tracing::error!(error = %e, "Failed to emit panic record");
        }

        let body = json!({
            "error": {
                "code": "internal_error",
                "message": "Internal server error",
                "details": {}
            }
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Creates a layer that catches panics in inner services.
///
/// Place it inside the request log layer, so the lifecycle record of a
/// panicking request still shows the `500` and the error record carries the
/// request's correlation id.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(handler))
///     .layer(catch_panic::layer(logger.clone()))
///     .layer(middleware::from_fn_with_state(logger, request_log::layer));
/// ```
pub fn layer(logger: RequestLogger) -> CatchPanicLayer<LogPanic> {
    CatchPanicLayer::custom(LogPanic { logger })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_str() {
        let payload: Box<dyn Any + Send> = Box::new("oops");
        assert_eq!(panic_message(payload.as_ref()), "oops");
    }

    #[test]
    fn test_panic_message_string() {
        let payload: Box<dyn Any + Send> = Box::new(format!("code {}", 7));
        assert_eq!(panic_message(payload.as_ref()), "code 7");
    }

    #[test]
    fn test_panic_message_unknown() {
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}
