//! Domain layer: request-scoped entities, resolved settings, and the
//! upstream contract.
//!
//! Nothing here performs I/O. Concrete upstream clients live in
//! [`crate::infrastructure`]; orchestration lives in
//! [`crate::application::services`].
//!
//! # Modules
//!
//! - [`settings`] - Immutable [`settings::EffectiveConfig`] and its policies
//! - [`hosted_link`] - Hosted auth link request/result
//! - [`provider`] - Supported account providers
//! - [`proxy_route`] - Proxied prefixes and path rewriting
//! - [`cors`] - Fixed CORS policy for proxied responses
//! - [`notify_event`] - Upstream notify webhook payload
//! - [`upstream`] - Upstream API trait and errors

pub mod cors;
pub mod hosted_link;
pub mod notify_event;
pub mod provider;
pub mod proxy_route;
pub mod settings;
pub mod upstream;
