//! Unipile upstream integration.
//!
//! - [`UnipileClient`] - Real REST client for the hosted auth API
//! - [`DisabledUpstream`] - No-op stand-in when credentials are missing
//! - [`payload`] - Request/response wire format

mod client;
mod disabled;
pub mod payload;

pub use client::{API_KEY_HEADER, HOSTED_LINK_PATH, UnipileClient, map_reqwest_error};
pub use disabled::DisabledUpstream;
