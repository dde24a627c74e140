//! # LinkedIn Connect
//!
//! Hosted LinkedIn account linking through Unipile, built with Axum.
//!
//! The service mints short-lived hosted auth links, relays the hosted UI's
//! API calls to the upstream with the API key attached (so the browser never
//! sees it), and receives the upstream's completion webhook.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Providers, resolved settings, CORS policy and the upstream trait
//! - **Application Layer** ([`application`]) - Link issuance and proxy forwarding
//! - **Infrastructure Layer** ([`infrastructure`]) - Unipile and LinkedIn HTTP clients
//! - **API Layer** ([`api`]) - Handlers, DTOs, pages and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! # Required for the hosted flow and the proxy
//! export UNIPILE_DSN="api1.unipile.com:13111"
//! export UNIPILE_API_KEY="..."
//!
//! # Start the service, then open http://localhost:3000
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables (and `.env` or
//! `env.local`) via [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{IssueError, LinkIssuer, ProxyGateway};
    pub use crate::domain::provider::Provider;
    pub use crate::domain::settings::EffectiveConfig;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
