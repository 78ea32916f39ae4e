//! Response bodies of the demo endpoints.

pub mod health;
pub mod order;
