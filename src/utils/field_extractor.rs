//! Header and handler lookups used by the record assembler.

use axum::http::{HeaderMap, header};

use crate::domain::HandlerId;

/// Placeholder for values the request doesn't carry.
pub const NOT_AVAILABLE: &str = "N/A";

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_CLIENT_VERSION: &str = "x-client-version";

/// Returns the first value of header `name`, or `default`.
///
/// Lookup is case-insensitive. Values that aren't valid UTF-8 count as
/// missing.
pub fn header(headers: &HeaderMap, name: &str, default: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(default)
        .to_string()
}

/// The `Accept` header, which clients use to select an API version.
pub fn api_version(headers: &HeaderMap) -> String {
    header(headers, header::ACCEPT.as_str(), NOT_AVAILABLE)
}

/// Leftmost address of `X-Forwarded-For`, i.e. the original client.
///
/// # Examples
///
/// ```ignore
/// headers.insert("x-forwarded-for", "209.49.75.165, 10.0.0.1".parse().unwrap());
/// assert_eq!(client_ip(&headers), "209.49.75.165");
/// ```
pub fn client_ip(headers: &HeaderMap) -> String {
    let forwarded = header(headers, X_FORWARDED_FOR, NOT_AVAILABLE);
    match forwarded.split_once(", ") {
        Some((first, _)) => first.to_string(),
        None => forwarded,
    }
}

/// `X-Client-Version` if the client sent one, otherwise the `User-Agent`.
pub fn client_version(headers: &HeaderMap) -> String {
    let version = header(headers, X_CLIENT_VERSION, NOT_AVAILABLE);
    if version != NOT_AVAILABLE {
        return version;
    }
    header(headers, header::USER_AGENT.as_str(), NOT_AVAILABLE)
}

/// `name#action` when both parts are known.
pub fn handler(id: &HandlerId) -> String {
    match (&id.name, &id.action) {
        (Some(name), Some(action)) => format!("{name}#{action}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}
