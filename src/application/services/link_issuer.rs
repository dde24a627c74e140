//! Hosted auth link issuance.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use url::Url;

use crate::domain::hosted_link::HostedLinkRequest;
use crate::domain::provider::Provider;
use crate::domain::settings::EffectiveConfig;
use crate::domain::upstream::{Capability, HostedAuthApi, UpstreamError};

/// Why a hosted link could not be issued.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IssueError {
    #[error("Server missing UNIPILE_DSN or UNIPILE_API_KEY")]
    NotConfigured,

    #[error("Provider {0} is not enabled")]
    ProviderNotEnabled(Provider),

    #[error("Failed to create a hosted auth link")]
    UpstreamMalformedResponse,

    #[error("Upstream call failed: {0}")]
    UpstreamCallFailed(#[source] UpstreamError),
}

/// Mints hosted auth links and returns the URL to redirect the browser to.
///
/// Holds the upstream behind [`HostedAuthApi`] so tests can count calls.
pub struct LinkIssuer {
    api: Arc<dyn HostedAuthApi>,
    config: Arc<EffectiveConfig>,
}

impl LinkIssuer {
    pub fn new(api: Arc<dyn HostedAuthApi>, config: Arc<EffectiveConfig>) -> Self {
        Self { api, config }
    }

    /// Issues a link for `provider`, valid for 15 minutes from now.
    ///
    /// `request_origin` is the origin the browser used to reach us; it only
    /// matters when the configuration resolves hosted-flow URLs per request.
    ///
    /// # Errors
    ///
    /// - [`IssueError::NotConfigured`] without upstream credentials (no call made)
    /// - [`IssueError::ProviderNotEnabled`] for providers outside `HOSTED_PROVIDERS`
    /// - [`IssueError::UpstreamCallFailed`] on transport or HTTP errors
    /// - [`IssueError::UpstreamMalformedResponse`] when no URL comes back
    pub async fn start_hosted_link(
        &self,
        provider: Provider,
        request_origin: Option<&Url>,
    ) -> Result<Url, IssueError> {
        self.start_hosted_link_at(provider, Utc::now(), request_origin)
            .await
    }

    /// Same as [`Self::start_hosted_link`] with an explicit issue time.
    pub async fn start_hosted_link_at(
        &self,
        provider: Provider,
        now: DateTime<Utc>,
        request_origin: Option<&Url>,
    ) -> Result<Url, IssueError> {
        let request = self.build_request(provider, now, request_origin)?;

        let result = match self.api.create_hosted_link(&request).await {
            Ok(result) => result,
            Err(UpstreamError::Decode(reason)) => {
                error!(%provider, %reason, "Hosted auth link response could not be decoded");
                return Err(IssueError::UpstreamMalformedResponse);
            }
            Err(UpstreamError::NotConfigured) => return Err(IssueError::NotConfigured),
            Err(err) => {
                error!(%provider, error = %err, "Error creating hosted auth link");
                return Err(IssueError::UpstreamCallFailed(err));
            }
        };

        let Some(raw_url) = result.url else {
            error!(%provider, "Upstream returned no hosted auth URL");
            return Err(IssueError::UpstreamMalformedResponse);
        };

        let url = Url::parse(&raw_url).map_err(|e| {
            error!(%provider, error = %e, "Upstream returned an invalid hosted auth URL");
            IssueError::UpstreamMalformedResponse
        })?;

        info!(%provider, expires_at = %request.expires_at, "Hosted auth link issued");
        Ok(url)
    }

    /// Operations the wired upstream client supports. Empty when disabled.
    pub fn capabilities(&self) -> Vec<Capability> {
        self.api.capabilities()
    }

    /// Assembles the upstream request without performing any I/O.
    pub fn build_request(
        &self,
        provider: Provider,
        now: DateTime<Utc>,
        request_origin: Option<&Url>,
    ) -> Result<HostedLinkRequest, IssueError> {
        let Some(api_url) = self.config.hosted_api_url(request_origin) else {
            warn!("Hosted auth link requested but upstream is not configured");
            return Err(IssueError::NotConfigured);
        };

        if !self.config.is_provider_enabled(provider) {
            return Err(IssueError::ProviderNotEnabled(provider));
        }

        let callbacks = self.config.callback_urls(request_origin);
        Ok(HostedLinkRequest::new(provider, now, api_url, callbacks))
    }
}
