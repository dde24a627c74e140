//! Request helpers shared by handlers.

pub mod request_origin;

pub use request_origin::request_origin;
