//! Where finished log lines go.
//!
//! Provides a [`LogSink`] trait with two implementations:
//! - [`TracingSink`] - Production sink on top of `tracing`
//! - [`MemorySink`] - Captures lines in memory for tests and tooling

mod memory_sink;
mod service;
mod tracing_sink;

pub use memory_sink::MemorySink;
pub use service::{LogSink, log_lazy};
pub use tracing_sink::{TARGET, TracingSink};

#[cfg(test)]
pub use service::MockLogSink;
