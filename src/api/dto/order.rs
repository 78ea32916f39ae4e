use serde::{Deserialize, Serialize};

/// Body of `GET /orders/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: u64,
    pub status: String,
}
