//! Infrastructure layer for external integrations.
//!
//! This layer implements the contracts defined by the domain layer against
//! real HTTP services.
//!
//! # Modules
//!
//! - [`unipile`] - Unipile hosted auth API client
//! - [`linkedin`] - Direct LinkedIn OAuth2 client (deprecated flow)
//! - [`http_client`] - Shared `reqwest` client construction

pub mod http_client;
pub mod linkedin;
pub mod unipile;
