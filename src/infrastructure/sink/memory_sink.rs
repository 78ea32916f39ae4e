//! In-memory sink for tests and tooling.

use serde_json::Value;
use std::sync::{Mutex, PoisonError};

use super::service::LogSink;
use crate::domain::Severity;

/// Keeps every accepted line in memory.
///
/// Lines below `min_severity` are refused, so the lazy message is never
/// evaluated for them.
#[derive(Debug)]
pub struct MemorySink {
    min_severity: Severity,
    lines: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    /// Accepts every severity.
    pub fn new() -> Self {
        Self::with_min_severity(Severity::Info)
    }

    pub fn with_min_severity(min_severity: Severity) -> Self {
        Self {
            min_severity,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the captured lines, oldest first.
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured lines parsed as JSON. Lines that aren't JSON become strings.
    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .into_iter()
            .map(|(_, line)| serde_json::from_str(&line).unwrap_or(Value::String(line)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    fn emit(&self, severity: Severity, message: String) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((severity, message));
    }
}
