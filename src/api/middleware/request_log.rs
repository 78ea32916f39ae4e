//! Structured request logging middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::application::RequestLogger;
use crate::domain::{CorrelationId, HandlerId, LoggedParams, RequestContext};
use crate::utils::query_params::parse_query;

tokio::task_local! {
    static REQUEST_ID: Option<String>;
}

/// Correlation id of the request being handled on this task, if it went
/// through [`layer`].
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(Clone::clone).ok().flatten()
}

/// Logs every request passing through as a single JSON record.
///
/// # Logging Behavior
///
/// **On Request:**
/// - Starts the clock
/// - If `log_request` is enabled, emits a record with `status: null` and no `duration`
///
/// **On Response:**
/// - Emits the lifecycle record with status, duration and, depending on the
///   tier, the filtered request parameters
///
/// Inner services run with the correlation id available through
/// [`current_request_id`].
///
/// The response is passed through untouched. Handlers can enrich the record
/// by inserting a [`HandlerId`] or [`LoggedParams`] into the response
/// extensions.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::request_log;
///
/// let app = Router::new()
///     .route("/orders/{id}", get(show_order))
///     .layer(middleware::from_fn_with_state(logger.clone(), request_log::layer));
/// ```
pub async fn layer(State(logger): State<RequestLogger>, req: Request, next: Next) -> Response {
    let pending = logger.begin();
    let mut ctx = request_context(&req, logger.request_id_header());

    if let Err(e) = pending.request_started(&ctx) {
        tracing::error!(error = %e, path = %ctx.path, "Failed to emit request start record");
    }

    let response = REQUEST_ID
        .scope(ctx.request_id.clone(), next.run(req))
        .await;

    apply_response(&mut ctx, &response);
    if let Err(e) = pending.finish(&ctx) {
        tracing::error!(error = %e, path = %ctx.path, "Failed to emit request record");
    }

    response
}

/// Captures what the logger needs from an incoming request.
pub fn request_context(req: &Request, request_id_header: &str) -> RequestContext {
    let uri = req.uri();

    let request_id = req
        .extensions()
        .get::<CorrelationId>()
        .map(|id| id.0.clone())
        .or_else(|| {
            req.headers()
                .get(request_id_header)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        });

    RequestContext {
        method: req.method().to_string(),
        path: uri.path().to_string(),
        status: None,
        headers: req.headers().clone(),
        params: uri.query().map(parse_query).unwrap_or_default(),
        request_id,
        handler: HandlerId::default(),
        extensions: req.extensions().clone(),
    }
}

/// Copies status and handler-provided details from the response.
pub fn apply_response(ctx: &mut RequestContext, response: &Response) {
    ctx.status = Some(response.status().as_u16());

    if let Some(handler) = response.extensions().get::<HandlerId>() {
        ctx.handler = handler.clone();
    }

    if let Some(LoggedParams(extra)) = response.extensions().get::<LoggedParams>() {
        for (key, value) in extra {
            ctx.params.insert(key.clone(), value.clone());
        }
    }
}
