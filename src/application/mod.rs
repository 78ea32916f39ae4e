//! Application layer: turns request data into log records and emits them.
//!
//! - [`options`] - The options bag recognised by the logger
//! - [`record_assembler`] - Field-set composition for request and error records
//! - [`request_logger`] - Request lifecycle (`begin` / `finish`) and error emission

pub mod options;
pub mod record_assembler;
pub mod request_logger;

pub use options::{ExtraAttributesFn, LogOptions};
pub use request_logger::{PendingRequest, RequestLogger};
