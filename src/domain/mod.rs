//! Plain data shared by every layer of the logger.
//!
//! # Architecture
//!
//! - [`level`] - Requested log tiers and sink severities
//! - [`context`] - What the hosting server tells us about a request
//! - [`record`] - The JSON record handed to the sink, plus its field catalog
//!
//! Nothing in here performs I/O or reads process-wide state.

pub mod context;
pub mod level;
pub mod record;

pub use context::{
    CorrelationId, HandlerId, LoggedParams, ParamValue, Params, RequestContext, ToFields,
    UploadedFile,
};
pub use level::{LogLevel, Severity};
pub use record::{LogRecord, fields};
