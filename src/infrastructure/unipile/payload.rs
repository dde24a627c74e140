//! Wire format of the Unipile "create hosted auth link" call.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

use crate::domain::hosted_link::HostedLinkRequest;
use crate::domain::provider::Provider;
use crate::domain::settings::{ApiUrlMode, trim_trailing_slash};

/// Field names carrying the hosted UI's API URL.
///
/// Older upstream SDK versions read the value from different fields, so in
/// direct mode the same URL is sent under all of them. This is the only place
/// that knows about those names.
pub fn api_url_field_names(mode: ApiUrlMode) -> &'static [&'static str] {
    match mode {
        ApiUrlMode::Proxy => &["api_url"],
        ApiUrlMode::Direct => &["api_url", "redirect_url", "base_url"],
    }
}

/// Request body for `POST /api/v1/hosted/accounts/link`.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct CreateHostedLinkPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(rename = "expiresOn")]
    pub expires_on: String,
    pub providers: Vec<Provider>,
    #[serde(flatten)]
    pub api_url: BTreeMap<&'static str, String>,
    pub success_redirect_url: Option<String>,
    pub failure_redirect_url: Option<String>,
    pub notify_url: Option<String>,
}

impl CreateHostedLinkPayload {
    pub fn from_request(request: &HostedLinkRequest, mode: ApiUrlMode) -> Self {
        let api_url = trim_trailing_slash(&request.api_url);
        let api_url = api_url_field_names(mode)
            .iter()
            .map(|name| (*name, api_url.clone()))
            .collect();

        Self {
            kind: "create",
            expires_on: request
                .expires_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            providers: vec![request.provider],
            api_url,
            success_redirect_url: request.success_redirect.as_ref().map(|u| u.to_string()),
            failure_redirect_url: request.failure_redirect.as_ref().map(|u| u.to_string()),
            notify_url: request.notify_url.as_ref().map(|u| u.to_string()),
        }
    }
}

/// Response body of the create call. Only `url` matters.
#[derive(Debug, Deserialize)]
pub struct CreateHostedLinkResponse {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
