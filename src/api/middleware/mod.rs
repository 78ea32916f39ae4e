//! HTTP middleware wiring the logger into an Axum router.
//!
//! - [`request_log`] - One JSON record per request
//! - [`catch_panic`] - Panics become error records and `500` responses

pub mod catch_panic;
pub mod request_log;
