//! Login endpoint whose body ends up, filtered, in the request record.

use axum::{Extension, Json, http::StatusCode};
use serde_json::{Value, json};

use crate::domain::{HandlerId, LoggedParams, ParamValue};

/// Accepts any JSON object as login form.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Response Codes
///
/// - **202 Accepted**: Body was a JSON object
/// - **422 Unprocessable Entity**: Body was valid JSON but not an object
///
/// Body fields are contributed as request parameters, so keys such as
/// `password` are redacted when listed in `LOG_FILTERED_KEYS`.
pub async fn create_session_handler(
    Json(body): Json<Value>,
) -> (StatusCode, Extension<HandlerId>, Extension<LoggedParams>, Json<Value>) {
    let handler = Extension(HandlerId::new("Sessions", "create"));

    let ParamValue::Map(params) = ParamValue::from(body) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            handler,
            Extension(LoggedParams::default()),
            Json(json!({"error": {"code": "validation_error", "message": "Expected a JSON object"}})),
        );
    };

    (
        StatusCode::ACCEPTED,
        handler,
        Extension(LoggedParams(params)),
        Json(json!({"status": "accepted"})),
    )
}
