//! Stand-in used when no upstream credentials are configured.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::hosted_link::{HostedLinkRequest, HostedLinkResult};
use crate::domain::upstream::{Capability, HostedAuthApi, UpstreamError};

/// Upstream implementation that never performs I/O.
///
/// The Link Issuer rejects requests before reaching it when the upstream is
/// not configured; it exists so the service graph is the same in both cases.
pub struct DisabledUpstream;

impl DisabledUpstream {
    pub fn new() -> Self {
        debug!("Using DisabledUpstream (hosted flow disabled)");
        Self
    }
}

impl Default for DisabledUpstream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostedAuthApi for DisabledUpstream {
    async fn create_hosted_link(
        &self,
        _request: &HostedLinkRequest,
    ) -> Result<HostedLinkResult, UpstreamError> {
        Err(UpstreamError::NotConfigured)
    }

    fn capabilities(&self) -> Vec<Capability> {
        Vec::new()
    }
}
