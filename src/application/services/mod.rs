//! Business logic services for the application layer.

pub mod link_issuer;
pub mod proxy_gateway;

pub use link_issuer::{IssueError, LinkIssuer};
pub use proxy_gateway::ProxyGateway;
