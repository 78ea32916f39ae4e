//! Query string decoding into nested request parameters.
//!
//! Supports the bracket convention used by most web frameworks:
//!
//! - `a=1` → `{"a": "1"}`
//! - `user[name]=me` → `{"user": {"name": "me"}}`
//! - `tags[]=x&tags[]=y` → `{"tags": ["x", "y"]}`
//!
//! A plain key repeated several times keeps its last value.

use url::form_urlencoded;

use crate::domain::{ParamValue, Params};

/// Decodes a raw (still percent-encoded) query string.
pub fn parse_query(query: &str) -> Params {
    let mut params = Params::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key.is_empty() {
            continue;
        }
        let segments = split_key(&key);
        insert(&mut params, &segments, value.into_owned());
    }
    params
}

/// `a[b][]` → `["a", "b", ""]`. Malformed keys are kept whole.
fn split_key(key: &str) -> Vec<String> {
    let Some(open) = key.find('[') else {
        return vec![key.to_string()];
    };
    if open == 0 {
        return vec![key.to_string()];
    }

    let mut segments = vec![key[..open].to_string()];
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            return vec![key.to_string()];
        };
        segments.push(stripped[..close].to_string());
        rest = &stripped[close + 1..];
    }
    if !rest.is_empty() {
        return vec![key.to_string()];
    }
    segments
}

fn insert(params: &mut Params, segments: &[String], value: String) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    let Some((next, tail)) = rest.split_first() else {
        params.insert(head.clone(), ParamValue::String(value));
        return;
    };

    let entry = params.entry(head.clone()).or_insert(ParamValue::Null);

    if next.is_empty() {
        if !matches!(entry, ParamValue::List(_)) {
            *entry = ParamValue::List(Vec::new());
        }
        if let ParamValue::List(items) = entry {
            if tail.is_empty() {
                items.push(ParamValue::String(value));
            } else {
                let mut nested = Params::new();
                insert(&mut nested, tail, value);
                items.push(ParamValue::Map(nested));
            }
        }
        return;
    }

    if !matches!(entry, ParamValue::Map(_)) {
        *entry = ParamValue::Map(Params::new());
    }
    if let ParamValue::Map(nested) = entry {
        insert(nested, rest, value);
    }
}
