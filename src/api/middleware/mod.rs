//! HTTP middleware for request processing.
//!
//! Provides the proxy CORS policy and request tracing.

pub mod cors;
pub mod tracing;
