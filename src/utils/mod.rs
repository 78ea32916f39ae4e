//! Pure helpers used while building a record.
//!
//! - [`value_filter`] - Redaction and truncation of request parameters
//! - [`field_extractor`] - Header and handler lookups with defaults
//! - [`timestamp`] - `date_time` and `duration` formatting
//! - [`query_params`] - Nested query string decoding

pub mod field_extractor;
pub mod query_params;
pub mod timestamp;
pub mod value_filter;
