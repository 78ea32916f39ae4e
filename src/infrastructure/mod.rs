//! Infrastructure layer: delivery of log lines to the outside world.
//!
//! See [`sink`] for the available destinations.

pub mod sink;
