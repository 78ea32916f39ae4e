//! # Request JSON Logger
//!
//! Structured request logging for Axum services: one JSON line per request,
//! with timing, identity and diagnostic fields, and with sensitive request
//! parameters redacted before anything is written.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Request context, log levels, the record type
//! - **Utilities** ([`utils`]) - Value filtering, header extraction, time formatting
//! - **Application Layer** ([`application`]) - Record assembly and request lifecycle
//! - **Infrastructure Layer** ([`infrastructure`]) - Log sinks
//! - **API Layer** ([`api`]) - Axum middleware and demo handlers
//!
//! ## Record
//!
//! ```json
//! {
//!   "log_type": "http",
//!   "method": "POST",
//!   "path": "/login",
//!   "status": 202,
//!   "request_id": "6b1f0c",
//!   "date_time": "2024-05-01T12:00:00Z",
//!   "api_version": "application/json",
//!   "duration": 1.372,
//!   "client_ip": "209.49.75.165",
//!   "client_version": "ios/1.5.4",
//!   "params": {"user": {"password": "[FILTERED]", "username": "me"}},
//!   "handler": "Sessions#create"
//! }
//! ```
//!
//! `client_ip`, `client_version` and `params` only appear at the `debug` and
//! `warn` tiers, or when forced with `include_debug_logging`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let logger = RequestLogger::new(
//!     LogOptions::new(LogLevel::Info),
//!     FilterConfig::new().with_filtered_keys(["password"]),
//!     Arc::new(TracingSink::new()),
//! );
//!
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(middleware::from_fn_with_state(logger, request_log::layer));
//! ```
//!
//! ## Configuration
//!
//! The binaries load configuration from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use application::{LogOptions, PendingRequest, RequestLogger};
pub use config::FilterConfig;
pub use error::{LoggerError, LoggerResult};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::middleware::{catch_panic, request_log};
    pub use crate::application::{LogOptions, PendingRequest, RequestLogger};
    pub use crate::config::FilterConfig;
    pub use crate::domain::{
        CorrelationId, HandlerId, LogLevel, LogRecord, LoggedParams, ParamValue, Params,
        RequestContext, Severity, ToFields, UploadedFile,
    };
    pub use crate::error::LoggerError;
    pub use crate::infrastructure::sink::{LogSink, MemorySink, TracingSink};
}
