//! Requested log tiers and the severities actually handed to the sink.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoggerError;

/// Tier requested by the middleware configuration.
///
/// The tier only decides which field sets end up in the record. Request
/// records are always emitted at [`Severity::Info`], see
/// [`LogLevel::sink_severity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    /// Whether this tier selects the debug field set
    /// (`client_ip`, `client_version`, `params`).
    ///
    /// `Warn` is treated like `Debug` here, `Error` like `Info`.
    pub fn includes_debug_fields(self) -> bool {
        matches!(self, Self::Debug | Self::Warn)
    }

    /// Severity used for request lifecycle records. Never escalated.
    pub fn sink_severity(self) -> Severity {
        Severity::Info
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LoggerError::InvalidLevel(other.to_string())),
        }
    }
}

/// Severity accepted by a [`crate::infrastructure::sink::LogSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
