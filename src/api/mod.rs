//! HTTP layer: the middleware and a handful of demo endpoints.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - Demo request handlers
//! - [`middleware`] - Request logging and panic capture

pub mod dto;
pub mod handlers;
pub mod middleware;
