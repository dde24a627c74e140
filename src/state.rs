//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkIssuer, ProxyGateway};
use crate::domain::settings::EffectiveConfig;
use crate::domain::upstream::HostedAuthApi;
use crate::infrastructure::http_client::build_http_client;
use crate::infrastructure::linkedin::LinkedInOAuthClient;
use crate::infrastructure::unipile::{DisabledUpstream, UnipileClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EffectiveConfig>,
    pub link_issuer: Arc<LinkIssuer>,
    pub proxy_gateway: Arc<ProxyGateway>,
    /// `None` when LinkedIn app credentials are not configured.
    pub linkedin: Option<Arc<LinkedInOAuthClient>>,
}

impl AppState {
    pub fn new(
        config: Arc<EffectiveConfig>,
        link_issuer: Arc<LinkIssuer>,
        proxy_gateway: Arc<ProxyGateway>,
        linkedin: Option<Arc<LinkedInOAuthClient>>,
    ) -> Self {
        Self {
            config,
            link_issuer,
            proxy_gateway,
            linkedin,
        }
    }

    /// Wires every service from the resolved configuration.
    ///
    /// One pooled HTTP client is shared by the link issuer, the proxy and the
    /// LinkedIn client. Without upstream credentials the issuer talks to a
    /// [`DisabledUpstream`] and never reaches the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn from_config(config: EffectiveConfig) -> reqwest::Result<Self> {
        let http = build_http_client(config.upstream_timeout)?;
        let config = Arc::new(config);

        let api: Arc<dyn HostedAuthApi> = match &config.upstream {
            Some(credentials) => {
                tracing::info!("Upstream enabled ({})", credentials.base_url);
                Arc::new(UnipileClient::new(
                    http.clone(),
                    credentials,
                    config.api_url_mode,
                ))
            }
            None => {
                tracing::info!("Upstream disabled (DisabledUpstream)");
                Arc::new(DisabledUpstream::new())
            }
        };

        let link_issuer = Arc::new(LinkIssuer::new(api, config.clone()));
        let proxy_gateway = Arc::new(ProxyGateway::new(http.clone(), config.upstream.clone()));
        let linkedin = config
            .linkedin
            .clone()
            .map(|app| Arc::new(LinkedInOAuthClient::new(http, app)));

        Ok(Self::new(config, link_issuer, proxy_gateway, linkedin))
    }
}
