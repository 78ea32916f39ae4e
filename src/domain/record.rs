//! The log record handed to the sink and its field catalog.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::LoggerError;

/// Top-level field names. Request data never becomes a top-level key,
/// except through caller-defined extra attributes.
pub mod fields {
    pub const LOG_TYPE: &str = "log_type";
    pub const METHOD: &str = "method";
    pub const PATH: &str = "path";
    pub const STATUS: &str = "status";
    pub const REQUEST_ID: &str = "request_id";
    pub const DATE_TIME: &str = "date_time";
    pub const API_VERSION: &str = "api_version";
    pub const DURATION: &str = "duration";
    pub const CLIENT_IP: &str = "client_ip";
    pub const CLIENT_VERSION: &str = "client_version";
    pub const PARAMS: &str = "params";
    pub const HANDLER: &str = "handler";
    pub const MESSAGE: &str = "message";

    /// Fields of the base set, the only ones that may be suppressed.
    pub const BASE: &[&str] = &[
        LOG_TYPE,
        METHOD,
        PATH,
        STATUS,
        REQUEST_ID,
        DATE_TIME,
        API_VERSION,
        DURATION,
    ];
}

pub const LOG_TYPE_HTTP: &str = "http";
pub const LOG_TYPE_ERROR: &str = "error";

/// A single JSON log line in the making.
///
/// Later inserts override earlier ones, which is what gives the field
/// sets their precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogRecord(Map<String, Value>);

impl LogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merges `other` into this record, `other` winning on collisions.
    pub fn merge(&mut self, other: Map<String, Value>) {
        for (key, value) in other {
            self.0.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the record to a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Serialize`] if the encoder rejects a value.
    pub fn to_json(&self) -> Result<String, LoggerError> {
        Ok(serde_json::to_string(&self.0)?)
    }
}
