//! HTTP request handlers of the demo server.

pub mod health;
pub mod orders;
pub mod panic;
pub mod sessions;

pub use health::health_handler;
pub use orders::show_order_handler;
pub use panic::panic_handler;
pub use sessions::create_session_handler;
