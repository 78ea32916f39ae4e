//! Sink backed by the process-wide `tracing` subscriber.

use tracing::Level;

use super::service::LogSink;
use crate::domain::Severity;

/// Target under which request records are emitted, usable in `RUST_LOG`
/// directives such as `request_log=off`.
pub const TARGET: &str = "request_log";

/// Emits records as `tracing` events under [`TARGET`].
///
/// The subscriber's filter decides the minimum severity; records below it
/// are never built.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Info => tracing::enabled!(target: TARGET, Level::INFO),
            Severity::Error => tracing::enabled!(target: TARGET, Level::ERROR),
        }
    }

    fn emit(&self, severity: Severity, message: String) {
        match severity {
            Severity::Info => tracing::info!(target: TARGET, "{message}"),
            Severity::Error => tracing::error!(target: TARGET, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sink::log_lazy;
    use serial_test::serial;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_filter<T>(directives: &str, captured: &Captured, f: impl FnOnce() -> T) -> T {
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(directives))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    #[test]
    #[serial]
    fn test_enabled_follows_subscriber_filter() {
        let captured = Captured::default();

        let (info, error) = with_filter("request_log=error", &captured, || {
            let sink = TracingSink::new();
            (sink.enabled(Severity::Info), sink.enabled(Severity::Error))
        });

        assert!(!info);
        assert!(error);
    }

    #[test]
    #[serial]
    fn test_filtered_severity_skips_assembly() {
        let captured = Captured::default();

        let emitted = with_filter("request_log=error", &captured, || {
            log_lazy(&TracingSink::new(), Severity::Info, || {
                panic!("record assembled for a filtered severity")
            })
        })
        .unwrap();

        assert!(!emitted);
        assert!(captured.contents().is_empty());
    }

    #[test]
    #[serial]
    fn test_emit_reaches_subscriber_under_target() {
        let captured = Captured::default();

        let emitted = with_filter("request_log=info", &captured, || {
            log_lazy(&TracingSink::new(), Severity::Info, || {
                Ok(r#"{"log_type":"http"}"#.to_string())
            })
        })
        .unwrap();

        assert!(emitted);
        let output = captured.contents();
        assert!(output.contains("INFO"));
        assert!(output.contains(TARGET));
        assert!(output.contains(r#"{"log_type":"http"}"#));
    }

    #[test]
    #[serial]
    fn test_other_targets_do_not_enable_request_log() {
        let captured = Captured::default();

        let enabled = with_filter("off,my_app=info", &captured, || {
            TracingSink::new().enabled(Severity::Info)
        });

        assert!(!enabled);
    }
}
