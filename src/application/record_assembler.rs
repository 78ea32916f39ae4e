//! Builds request and error records.
//!
//! A request record is composed from four field sets, each overriding the
//! previous one on key collisions:
//!
//! 1. **Base** - always present, minus configured suppressions
//! 2. **Debug** - `client_ip`, `client_version`, `params`, only when enabled
//! 3. **Handler** - `handler`
//! 4. **Extra** - whatever the caller's function returns, `null`s dropped

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::time::{Duration, Instant};

use crate::application::options::LogOptions;
use crate::config::FilterConfig;
use crate::domain::record::{LOG_TYPE_ERROR, LOG_TYPE_HTTP};
use crate::domain::{LogRecord, RequestContext, fields};
use crate::utils::{field_extractor, timestamp, value_filter};

/// Assembles the record for `ctx`.
///
/// `started` is the moment the request arrived; without it the record has
/// no `duration`.
pub fn assemble(
    ctx: &RequestContext,
    started: Option<Instant>,
    options: &LogOptions,
    filter: &FilterConfig,
) -> LogRecord {
    assemble_at(
        ctx,
        started.map(|s| s.elapsed()),
        Utc::now(),
        options,
        filter,
    )
}

/// [`assemble`] with an explicit clock.
pub fn assemble_at(
    ctx: &RequestContext,
    elapsed: Option<Duration>,
    now: DateTime<Utc>,
    options: &LogOptions,
    filter: &FilterConfig,
) -> LogRecord {
    let mut record = base_fields(ctx, elapsed, now, filter);
    if options.include_debug_fields() {
        record.merge(debug_fields(ctx, filter));
    }
    record.merge(handler_fields(ctx));
    record.merge(extra_fields(ctx, options));
    record
}

fn base_fields(
    ctx: &RequestContext,
    elapsed: Option<Duration>,
    now: DateTime<Utc>,
    filter: &FilterConfig,
) -> LogRecord {
    let mut record = LogRecord::new();
    record.insert(fields::LOG_TYPE, LOG_TYPE_HTTP);
    record.insert(fields::METHOD, ctx.method.clone());
    record.insert(fields::PATH, ctx.path.clone());
    record.insert(fields::STATUS, ctx.status);
    record.insert(fields::REQUEST_ID, ctx.request_id.clone());
    record.insert(fields::DATE_TIME, timestamp::format_date_time(now));
    record.insert(fields::API_VERSION, field_extractor::api_version(&ctx.headers));
    if let Some(elapsed) = elapsed {
        record.insert(fields::DURATION, timestamp::duration_millis(elapsed));
    }

    for name in &filter.suppressed_fields {
        record.remove(name);
    }
    record
}

fn debug_fields(ctx: &RequestContext, filter: &FilterConfig) -> Map<String, Value> {
    let mut set = Map::new();
    set.insert(
        fields::CLIENT_IP.into(),
        field_extractor::client_ip(&ctx.headers).into(),
    );
    set.insert(
        fields::CLIENT_VERSION.into(),
        field_extractor::client_version(&ctx.headers).into(),
    );
    set.insert(
        fields::PARAMS.into(),
        value_filter::filter_params(&ctx.params, &filter.filtered_keys),
    );
    set
}

fn handler_fields(ctx: &RequestContext) -> Map<String, Value> {
    let mut set = Map::new();
    set.insert(
        fields::HANDLER.into(),
        field_extractor::handler(&ctx.handler).into(),
    );
    set
}

fn extra_fields(ctx: &RequestContext, options: &LogOptions) -> Map<String, Value> {
    match &options.extra_attributes_fn {
        Some(f) => f(ctx).into_iter().filter(|(_, v)| !v.is_null()).collect(),
        None => Map::new(),
    }
}

/// Renders an error as `** (kind) reason`, followed by the indented trace.
pub fn format_error(
    kind: &str,
    reason: &dyn fmt::Display,
    trace: Option<&dyn fmt::Display>,
) -> String {
    let mut message = format!("** ({kind}) {reason}");
    if let Some(trace) = trace {
        for line in trace.to_string().lines().filter(|l| !l.trim().is_empty()) {
            message.push_str("\n    ");
            message.push_str(line.trim());
        }
    }
    message
}

/// Builds the minimal record used for errors outside the request lifecycle.
pub fn error_record(message: String, request_id: Option<&str>) -> LogRecord {
    let mut record = LogRecord::new();
    record.insert(fields::LOG_TYPE, LOG_TYPE_ERROR);
    record.insert(fields::MESSAGE, message);
    record.insert(fields::REQUEST_ID, request_id.map(str::to_string));
    record
}
