use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::settings::LinkedInApp;

/// LinkedIn OAuth failure, tagged with the short code shown on the failure page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OAuthError {
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Profile fetch failed: {0}")]
    Profile(String),
}

impl OAuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TokenExchange(_) => "token_exchange_failed",
            Self::Profile(_) => "profile_fetch_failed",
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Subset of the OpenID Connect userinfo document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkedInProfile {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl LinkedInProfile {
    /// Best available display name.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }

        let parts: Vec<&str> = [self.given_name.as_deref(), self.family_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            "LinkedIn user".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Authorization-code exchange against LinkedIn.
pub struct LinkedInOAuthClient {
    http: reqwest::Client,
    app: LinkedInApp,
}

impl LinkedInOAuthClient {
    pub fn new(http: reqwest::Client, app: LinkedInApp) -> Self {
        Self { http, app }
    }

    /// Exchanges an authorization `code` for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let redirect_uri = self.app.redirect_uri.to_string();
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
            ("client_id", self.app.client_id.as_str()),
            ("client_secret", self.app.client_secret()),
        ];

        let response = self
            .http
            .post(self.app.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "LinkedIn token exchange rejected");
            return Err(OAuthError::TokenExchange(format!("status {}", status.as_u16())));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;

        debug!("LinkedIn access token obtained");
        Ok(token.access_token)
    }

    /// Fetches the signed-in member's profile with `access_token`.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<LinkedInProfile, OAuthError> {
        let response = self
            .http
            .get(self.app.userinfo_url.clone())
            .bearer_auth(access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| OAuthError::Profile(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "LinkedIn profile request rejected");
            return Err(OAuthError::Profile(format!("status {}", status.as_u16())));
        }

        response
            .json::<LinkedInProfile>()
            .await
            .map_err(|e| OAuthError::Profile(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>, given: Option<&str>, family: Option<&str>) -> LinkedInProfile {
        LinkedInProfile {
            sub: None,
            name: name.map(str::to_string),
            given_name: given.map(str::to_string),
            family_name: family.map(str::to_string),
            email: None,
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(
            profile(Some("Ada Lovelace"), Some("Ada"), None).display_name(),
            "Ada Lovelace"
        );
    }

    #[test]
    fn test_display_name_from_parts() {
        assert_eq!(
            profile(None, Some("Ada"), Some("Lovelace")).display_name(),
            "Ada Lovelace"
        );
        assert_eq!(profile(Some(" "), None, None).display_name(), "LinkedIn user");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            OAuthError::TokenExchange("x".into()).code(),
            "token_exchange_failed"
        );
        assert_eq!(OAuthError::Profile("x".into()).code(), "profile_fetch_failed");
    }
}
