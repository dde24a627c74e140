//! Application layer services.
//!
//! Services orchestrate domain types and upstream clients and expose a small
//! API to the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_issuer::LinkIssuer`] - Hosted auth link issuance
//! - [`services::proxy_gateway::ProxyGateway`] - Credential-injecting reverse proxy

pub mod services;
