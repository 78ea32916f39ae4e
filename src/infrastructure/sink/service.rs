//! Sink trait and lazy emission.

use crate::domain::Severity;
use crate::error::LoggerResult;

/// Destination of finished log lines.
///
/// Implementations must be thread-safe and must not block the request path;
/// delivery is fire-and-forget.
///
/// # Implementations
///
/// - [`crate::infrastructure::sink::TracingSink`] - Process-wide `tracing` subscriber
/// - [`crate::infrastructure::sink::MemorySink`] - In-memory capture for tests and tooling
#[cfg_attr(test, mockall::automock)]
pub trait LogSink: Send + Sync {
    /// Whether a line at `severity` would be delivered at all.
    ///
    /// When this returns `false` the record is neither assembled nor
    /// serialized.
    fn enabled(&self, severity: Severity) -> bool;

    /// Delivers one serialized line.
    fn emit(&self, severity: Severity, message: String);
}

/// Hands a lazily produced message to `sink`.
///
/// `message` is only called when the sink accepts `severity`. Returns
/// whether anything was emitted.
///
/// # Errors
///
/// Propagates the error returned by `message`, typically a serialization
/// failure.
pub fn log_lazy<F>(sink: &dyn LogSink, severity: Severity, message: F) -> LoggerResult<bool>
where
    F: FnOnce() -> LoggerResult<String>,
{
    if !sink.enabled(severity) {
        metrics::counter!("request_log_records_skipped_total", "severity" => severity.as_str())
            .increment(1);
        return Ok(false);
    }

    let line = message()?;
    sink.emit(severity, line);
    metrics::counter!("request_log_records_total", "severity" => severity.as_str()).increment(1);
    Ok(true)
}
