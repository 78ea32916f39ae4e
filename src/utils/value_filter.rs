//! Redaction of sensitive request parameters.
//!
//! Walks arbitrarily nested parameter data and replaces the value of every
//! sensitive key with [`FILTERED`], at any depth. Long strings are cut down
//! to [`MAX_STRING_CHARS`] characters so a single parameter can't blow up a
//! log line.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::domain::{ParamValue, Params};

/// Marker written in place of a redacted value.
pub const FILTERED: &str = "[FILTERED]";

/// Longest string, in characters, that survives filtering unchanged.
pub const MAX_STRING_CHARS: usize = 501;

/// Filters a whole parameter map, producing a JSON object.
///
/// # Examples
///
/// ```ignore
/// let keys = HashSet::from(["password".to_string()]);
/// let params = Params::from([("password".to_string(), ParamValue::from("s3cr3t"))]);
///
/// assert_eq!(filter_params(&params, &keys), json!({"password": "[FILTERED]"}));
/// ```
pub fn filter_params(params: &Params, sensitive_keys: &HashSet<String>) -> Value {
    Value::Object(
        params
            .iter()
            .map(|(key, value)| (key.clone(), filter_entry(key, value, sensitive_keys)))
            .collect(),
    )
}

/// Filters a single parameter value.
///
/// Record-like values are first turned into their field map, then filtered
/// like any other map.
pub fn filter_param(value: &ParamValue, sensitive_keys: &HashSet<String>) -> Value {
    match value {
        ParamValue::Null => Value::Null,
        ParamValue::Bool(b) => Value::Bool(*b),
        ParamValue::Number(n) => Value::Number(n.clone()),
        ParamValue::String(s) => Value::String(truncate(s)),
        ParamValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| filter_param(item, sensitive_keys))
                .collect(),
        ),
        ParamValue::Map(map) => filter_params(map, sensitive_keys),
        ParamValue::Record(record) => filter_object(&record.to_fields(), sensitive_keys),
    }
}

/// Filters an already decoded JSON value.
///
/// Same rules as [`filter_param`]; applying it twice gives the same result
/// as applying it once.
pub fn filter_value(value: &Value, sensitive_keys: &HashSet<String>) -> Value {
    match value {
        Value::String(s) => Value::String(truncate(s)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| filter_value(item, sensitive_keys))
                .collect(),
        ),
        Value::Object(map) => filter_object(map, sensitive_keys),
        other => other.clone(),
    }
}

fn filter_object(map: &Map<String, Value>, sensitive_keys: &HashSet<String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, value)| {
                let filtered = if sensitive_keys.contains(key) {
                    Value::String(FILTERED.to_string())
                } else {
                    filter_value(value, sensitive_keys)
                };
                (key.clone(), filtered)
            })
            .collect(),
    )
}

fn filter_entry(key: &str, value: &ParamValue, sensitive_keys: &HashSet<String>) -> Value {
    if sensitive_keys.contains(key) {
        Value::String(FILTERED.to_string())
    } else {
        filter_param(value, sensitive_keys)
    }
}

/// Keeps at most the first [`MAX_STRING_CHARS`] characters.
fn truncate(s: &str) -> String {
    match s.char_indices().nth(MAX_STRING_CHARS) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}
