//! Order lookup, tagged with its handler identity.

use axum::{Extension, Json, extract::Path};

use crate::api::dto::order::OrderResponse;
use crate::domain::HandlerId;

/// Returns a stub order.
///
/// # Endpoint
///
/// `GET /orders/{id}`
///
/// The request record shows `handler = "Orders#show"`.
pub async fn show_order_handler(
    Path(id): Path<u64>,
) -> (Extension<HandlerId>, Json<OrderResponse>) {
    (
        Extension(HandlerId::new("Orders", "show")),
        Json(OrderResponse {
            id,
            status: "shipped".to_string(),
        }),
    )
}
