//! Per-middleware logging options.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::domain::{LogLevel, RequestContext};

/// Caller-supplied function adding custom fields to every request record.
///
/// Entries whose value is `null` are dropped before merging.
pub type ExtraAttributesFn = Arc<dyn Fn(&RequestContext) -> Map<String, Value> + Send + Sync>;

/// Options recognised by the request logger.
///
/// # Examples
///
/// ```ignore
/// let options = LogOptions::new(LogLevel::Info)
///     .log_request(true)
///     .extra_attributes(|ctx| {
///         let mut extra = Map::new();
///         extra.insert("tenant".into(), tenant_of(ctx).into());
///         extra
///     });
/// ```
#[derive(Clone, Default)]
pub struct LogOptions {
    /// Requested tier; decides whether debug fields are included.
    pub log: LogLevel,
    /// Also emit a record, without duration, when the request arrives.
    pub log_request: bool,
    pub extra_attributes_fn: Option<ExtraAttributesFn>,
    /// Include debug fields whatever the tier.
    pub include_debug_logging: bool,
}

impl LogOptions {
    pub fn new(log: LogLevel) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn log_request(mut self, enabled: bool) -> Self {
        self.log_request = enabled;
        self
    }

    pub fn include_debug_logging(mut self, enabled: bool) -> Self {
        self.include_debug_logging = enabled;
        self
    }

    pub fn extra_attributes<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestContext) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.extra_attributes_fn = Some(Arc::new(f));
        self
    }

    /// Whether `client_ip`, `client_version` and `params` go into records.
    pub fn include_debug_fields(&self) -> bool {
        self.include_debug_logging || self.log.includes_debug_fields()
    }
}

impl fmt::Debug for LogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogOptions")
            .field("log", &self.log)
            .field("log_request", &self.log_request)
            .field("extra_attributes_fn", &self.extra_attributes_fn.is_some())
            .field("include_debug_logging", &self.include_debug_logging)
            .finish()
    }
}
