//! Data Transfer Objects for HTTP request/response serialization.

pub mod callback;
pub mod diagnostic;
pub mod health;
