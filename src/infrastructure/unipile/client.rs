//! HTTP client for the Unipile account-linking API.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::{debug, warn};
use url::Url;

use super::payload::{CreateHostedLinkPayload, CreateHostedLinkResponse};
use crate::domain::hosted_link::{HostedLinkRequest, HostedLinkResult};
use crate::domain::settings::{ApiUrlMode, UpstreamCredentials, trim_trailing_slash};
use crate::domain::upstream::{Capability, HostedAuthApi, UpstreamError, UpstreamErrorBody};

/// Header carrying the shared secret on every upstream call.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path of the create-hosted-link endpoint, relative to the DSN base.
pub const HOSTED_LINK_PATH: &str = "/api/v1/hosted/accounts/link";

/// Unipile REST client bound to one DSN and API key.
pub struct UnipileClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    api_url_mode: ApiUrlMode,
}

impl UnipileClient {
    pub fn new(
        http: reqwest::Client,
        credentials: &UpstreamCredentials,
        api_url_mode: ApiUrlMode,
    ) -> Self {
        Self {
            http,
            base_url: credentials.base_url.clone(),
            api_key: credentials.api_key().to_string(),
            api_url_mode,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", trim_trailing_slash(&self.base_url), path)
    }
}

#[async_trait]
impl HostedAuthApi for UnipileClient {
    async fn create_hosted_link(
        &self,
        request: &HostedLinkRequest,
    ) -> Result<HostedLinkResult, UpstreamError> {
        let payload = CreateHostedLinkPayload::from_request(request, self.api_url_mode);
        debug!(
            provider = %request.provider,
            expires_on = %payload.expires_on,
            "Requesting hosted auth link"
        );

        let response = self
            .http
            .post(self.endpoint(HOSTED_LINK_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<UpstreamErrorBody>().await.ok();
            warn!(status = status.as_u16(), ?body, "Hosted auth link request rejected");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .json::<CreateHostedLinkResponse>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        debug!(object = ?body.object, has_url = body.url.is_some(), "Hosted auth link response");

        Ok(HostedLinkResult {
            url: body.url.filter(|url| !url.trim().is_empty()),
        })
    }

    fn capabilities(&self) -> Vec<Capability> {
        vec![Capability {
            name: "create_hosted_link",
            method: "POST",
            path: HOSTED_LINK_PATH,
            description: "Mint a single-use hosted auth URL for one provider",
        }]
    }
}

/// Maps a transport failure, keeping timeouts distinguishable.
pub fn map_reqwest_error(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(err.to_string())
    }
}
