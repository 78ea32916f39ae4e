//! Endpoint that always panics, for checking error records.

/// # Endpoint
///
/// `GET /panic`
pub async fn panic_handler() -> &'static str {
    panic!("oops")
}
