//! Request lifecycle logging: start, finish and out-of-band errors.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::application::options::LogOptions;
use crate::application::record_assembler::{assemble, error_record, format_error};
use crate::config::{Config, FilterConfig};
use crate::domain::{RequestContext, Severity};
use crate::error::LoggerResult;
use crate::infrastructure::sink::{LogSink, log_lazy};

#[derive(Clone)]
struct Inner {
    options: LogOptions,
    filter: FilterConfig,
    sink: Arc<dyn LogSink>,
    request_id_header: String,
}

/// Emits one JSON record per request, plus error records on demand.
///
/// Cheap to clone; all clones share the same configuration and sink.
///
/// # Usage Flow
///
/// 1. [`RequestLogger::begin`] when the request arrives
/// 2. [`PendingRequest::request_started`] if start records are wanted
/// 3. [`PendingRequest::finish`] once the response is ready
///
/// Dropping a [`PendingRequest`] without finishing it (e.g. the request was
/// cancelled) simply produces no lifecycle record.
#[derive(Clone)]
pub struct RequestLogger {
    inner: Arc<Inner>,
}

impl RequestLogger {
    pub fn new(options: LogOptions, filter: FilterConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                options,
                filter,
                sink,
                request_id_header: "x-request-id".to_string(),
            }),
        }
    }

    /// Builds a logger from loaded configuration.
    ///
    /// Extra attribute functions can't come from the environment; add them
    /// to `options` with [`RequestLogger::with_options`].
    pub fn from_config(config: &Config, sink: Arc<dyn LogSink>) -> Self {
        let options = LogOptions::new(config.request_log_level)
            .log_request(config.log_request)
            .include_debug_logging(config.include_debug_logging);

        Self::new(options, config.filter.clone(), sink)
            .with_request_id_header(config.request_id_header.clone())
    }

    /// Replaces the options, keeping filter, sink and header.
    pub fn with_options(self, options: LogOptions) -> Self {
        let mut inner = (*self.inner).clone();
        inner.options = options;
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn with_request_id_header(self, header: impl Into<String>) -> Self {
        let mut inner = (*self.inner).clone();
        inner.request_id_header = header.into().to_ascii_lowercase();
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn options(&self) -> &LogOptions {
        &self.inner.options
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.inner.filter
    }

    /// Header the correlation id is read from, lowercase.
    pub fn request_id_header(&self) -> &str {
        &self.inner.request_id_header
    }

    /// Starts timing a request.
    pub fn begin(&self) -> PendingRequest {
        PendingRequest {
            logger: self.clone(),
            started: Instant::now(),
        }
    }

    /// Emits the record for `ctx`. `started` adds a `duration` field.
    ///
    /// The record is only assembled if the sink accepts its severity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoggerError::Serialize`] if the record can't be encoded.
    pub fn log(&self, ctx: &RequestContext, started: Option<Instant>) -> LoggerResult<bool> {
        let inner = &self.inner;
        let severity = inner.options.log.sink_severity();
        log_lazy(inner.sink.as_ref(), severity, || {
            assemble(ctx, started, &inner.options, &inner.filter).to_json()
        })
    }

    /// Emits `{log_type: "error", message, request_id}` at error severity.
    ///
    /// `message` is rendered by [`format_error`]. Not tied to any request
    /// lifecycle and never filtered.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoggerError::Serialize`] if the record can't be encoded.
    pub fn log_error(
        &self,
        kind: &str,
        reason: &dyn fmt::Display,
        trace: Option<&dyn fmt::Display>,
        request_id: Option<&str>,
    ) -> LoggerResult<bool> {
        log_lazy(self.inner.sink.as_ref(), Severity::Error, || {
            error_record(format_error(kind, reason, trace), request_id).to_json()
        })
    }

    /// [`RequestLogger::log_error`] for a `std::error::Error`, with its
    /// `source()` chain appended to the reason.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoggerError::Serialize`] if the record can't be encoded.
    pub fn log_std_error(
        &self,
        err: &(dyn Error + 'static),
        request_id: Option<&str>,
    ) -> LoggerResult<bool> {
        let mut reason = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            reason.push_str(": ");
            reason.push_str(&cause.to_string());
            source = cause.source();
        }
        self.log_error("error", &reason, None, request_id)
    }
}

impl fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogger")
            .field("options", &self.inner.options)
            .field("filter", &self.inner.filter)
            .field("request_id_header", &self.inner.request_id_header)
            .finish_non_exhaustive()
    }
}

/// A request that has started but not finished.
#[derive(Debug)]
pub struct PendingRequest {
    logger: RequestLogger,
    started: Instant,
}

impl PendingRequest {
    /// Emits the request-start record if `log_request` is enabled.
    ///
    /// The record has no `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoggerError::Serialize`] if the record can't be encoded.
    pub fn request_started(&self, ctx: &RequestContext) -> LoggerResult<bool> {
        if !self.logger.options().log_request {
            return Ok(false);
        }
        self.logger.log(ctx, None)
    }

    /// Emits the lifecycle record, with the elapsed time since
    /// [`RequestLogger::begin`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoggerError::Serialize`] if the record can't be encoded.
    pub fn finish(self, ctx: &RequestContext) -> LoggerResult<bool> {
        self.logger.log(ctx, Some(self.started))
    }
}
