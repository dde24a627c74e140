//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod connect;
pub mod health;
pub mod linkedin_callback;
pub mod notify;
pub mod pages;
pub mod proxy;

pub use connect::connect_handler;
pub use health::health_handler;
pub use linkedin_callback::linkedin_callback_handler;
pub use notify::notify_handler;
pub use pages::{failure_handler, index_handler, success_handler};
pub use proxy::proxy_handler;
