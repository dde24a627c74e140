//! Resolved, immutable runtime settings shared by every component.
//!
//! [`EffectiveConfig`] is produced once at startup by
//! [`crate::config::Config::resolve`] and handed to services behind an `Arc`.
//! Nothing mutates it afterwards.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::domain::cors::CorsPolicy;
use crate::domain::provider::Provider;
use crate::domain::proxy_route::ProxyRoute;

/// Fixed path of the success page on the public origin.
pub const SUCCESS_PATH: &str = "/success";
/// Fixed path of the failure page on the public origin.
pub const FAILURE_PATH: &str = "/failure";
/// Fixed path of the notify webhook on the public origin.
pub const NOTIFY_PATH: &str = "/unipile/notify";
/// Fixed path of the deprecated LinkedIn OAuth callback.
pub const LINKEDIN_CALLBACK_PATH: &str = "/linkedin/callback";

/// Where the public base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrlSource {
    /// `BASE_URL` was set.
    Explicit,
    /// Inferred from the deployment host (`VERCEL_URL`).
    Deployment,
    /// Nothing configured, `http://localhost:<port>`.
    Localhost,
}

/// How unset success/failure/notify URLs are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackUrlPolicy {
    /// `<static origin>/<fixed path>`.
    Static,
    /// Left out of the upstream request entirely.
    None,
    /// `<request origin>/<fixed path>`, computed per request.
    RequestOrigin,
}

/// Which URL the hosted UI is told to call back into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiUrlMode {
    /// Our own origin, so hosted UI calls route through the proxy gateway.
    Proxy,
    /// The raw upstream base URL.
    Direct,
}

/// Behavior of the routes mounted under the proxied prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMode {
    /// Forward to the upstream with the secret attached.
    Forward,
    /// Answer locally with diagnostic JSON, never contacting the upstream.
    Diagnostic,
    /// No proxy routes at all.
    Off,
}

/// Error for an unrecognized mode name in configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownMode {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for CallbackUrlPolicy {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "none" | "null" => Ok(Self::None),
            "request" => Ok(Self::RequestOrigin),
            _ => Err(UnknownMode {
                kind: "CALLBACK_URL_MODE",
                value: s.to_string(),
                expected: "static, none, request",
            }),
        }
    }
}

impl FromStr for ApiUrlMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proxy" => Ok(Self::Proxy),
            "direct" => Ok(Self::Direct),
            _ => Err(UnknownMode {
                kind: "API_URL_MODE",
                value: s.to_string(),
                expected: "proxy, direct",
            }),
        }
    }
}

impl FromStr for ProxyMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "diagnostic" => Ok(Self::Diagnostic),
            "off" => Ok(Self::Off),
            _ => Err(UnknownMode {
                kind: "PROXY_MODE",
                value: s.to_string(),
                expected: "forward, diagnostic, off",
            }),
        }
    }
}

/// Upstream API location and the shared secret proving our identity to it.
///
/// The secret is only readable through [`UpstreamCredentials::api_key`] and
/// is masked in `Debug` output.
#[derive(Clone)]
pub struct UpstreamCredentials {
    pub base_url: Url,
    api_key: String,
}

impl UpstreamCredentials {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for UpstreamCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamCredentials")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"***")
            .finish()
    }
}

/// LinkedIn OAuth application used by the deprecated direct callback.
#[derive(Clone)]
pub struct LinkedInApp {
    pub client_id: String,
    client_secret: String,
    pub redirect_uri: Url,
    pub token_url: Url,
    pub userinfo_url: Url,
}

impl LinkedInApp {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: Url,
        token_url: Url,
        userinfo_url: Url,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri,
            token_url,
            userinfo_url,
        }
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for LinkedInApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedInApp")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri.as_str())
            .finish()
    }
}

/// Success/failure/notify URLs for one hosted link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallbackUrls {
    pub success: Option<Url>,
    pub failure: Option<Url>,
    pub notify: Option<Url>,
}

/// Process-wide configuration after precedence rules were applied.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub public_base_url: Url,
    pub base_url_source: BaseUrlSource,
    /// `API_ORIGIN`: overrides the public origin for hosted-flow URLs only.
    pub api_origin: Option<Url>,
    /// `None` disables the hosted flow and the proxy.
    pub upstream: Option<UpstreamCredentials>,
    pub success_url: Option<Url>,
    pub failure_url: Option<Url>,
    pub notify_url: Option<Url>,
    pub callback_policy: CallbackUrlPolicy,
    pub api_url_mode: ApiUrlMode,
    pub proxy_mode: ProxyMode,
    pub proxy_routes: Vec<ProxyRoute>,
    pub cors: CorsPolicy,
    pub providers: Vec<Provider>,
    pub linkedin: Option<LinkedInApp>,
    pub upstream_timeout: Duration,
}

impl EffectiveConfig {
    pub fn is_upstream_configured(&self) -> bool {
        self.upstream.is_some()
    }

    pub fn is_provider_enabled(&self, provider: Provider) -> bool {
        self.providers.contains(&provider)
    }

    /// Origin used for URLs handed to the upstream during a hosted flow.
    ///
    /// Precedence: `API_ORIGIN`, then the request origin (when the callback
    /// policy asks for it, or when no static base URL was configured), then
    /// the public base URL.
    pub fn flow_origin(&self, request_origin: Option<&Url>) -> Url {
        if let Some(origin) = &self.api_origin {
            return origin.clone();
        }

        let prefer_request = self.callback_policy == CallbackUrlPolicy::RequestOrigin
            || self.base_url_source == BaseUrlSource::Localhost;

        match request_origin {
            Some(origin) if prefer_request => origin.clone(),
            _ => self.public_base_url.clone(),
        }
    }

    /// Callback URLs for one hosted link. Explicit overrides always win.
    pub fn callback_urls(&self, request_origin: Option<&Url>) -> CallbackUrls {
        let default_for = |path: &str| -> Option<Url> {
            match self.callback_policy {
                CallbackUrlPolicy::None => None,
                CallbackUrlPolicy::Static => {
                    Some(append_path(&self.flow_origin(None), path))
                }
                CallbackUrlPolicy::RequestOrigin => {
                    Some(append_path(&self.flow_origin(request_origin), path))
                }
            }
        };

        CallbackUrls {
            success: self.success_url.clone().or_else(|| default_for(SUCCESS_PATH)),
            failure: self.failure_url.clone().or_else(|| default_for(FAILURE_PATH)),
            notify: self.notify_url.clone().or_else(|| default_for(NOTIFY_PATH)),
        }
    }

    /// URL the hosted UI uses for its API calls, or `None` when the upstream
    /// is not configured.
    pub fn hosted_api_url(&self, request_origin: Option<&Url>) -> Option<Url> {
        let upstream = self.upstream.as_ref()?;
        match self.api_url_mode {
            ApiUrlMode::Proxy => Some(self.flow_origin(request_origin)),
            ApiUrlMode::Direct => Some(upstream.base_url.clone()),
        }
    }
}

/// Appends `path` to the path of `base`, keeping any path `base` already has.
pub fn append_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url
}

/// Renders a URL without the trailing slash `Url` adds to bare origins.
pub fn trim_trailing_slash(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}


#[cfg(test)]
mod tests {
    use super::test_support::base_config;
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_static_policy_uses_public_base() {
        let mut config = base_config();
        config.public_base_url = url("https://app.example.com");
        config.base_url_source = BaseUrlSource::Explicit;

        let urls = config.callback_urls(Some(&url("https://other.example.com")));

        assert_eq!(urls.success.unwrap().as_str(), "https://app.example.com/success");
        assert_eq!(urls.failure.unwrap().as_str(), "https://app.example.com/failure");
        assert_eq!(
            urls.notify.unwrap().as_str(),
            "https://app.example.com/unipile/notify"
        );
    }

    #[test]
    fn test_none_policy_leaves_unset_urls_empty() {
        let mut config = base_config();
        config.callback_policy = CallbackUrlPolicy::None;
        config.success_url = Some(url("https://custom.example.com/ok"));

        let urls = config.callback_urls(None);

        assert_eq!(urls.success.unwrap().as_str(), "https://custom.example.com/ok");
        assert!(urls.failure.is_none());
        assert!(urls.notify.is_none());
    }

    #[test]
    fn test_request_policy_uses_request_origin() {
        let mut config = base_config();
        config.public_base_url = url("https://app.example.com");
        config.base_url_source = BaseUrlSource::Explicit;
        config.callback_policy = CallbackUrlPolicy::RequestOrigin;

        let urls = config.callback_urls(Some(&url("https://preview.example.com")));
        assert_eq!(
            urls.success.unwrap().as_str(),
            "https://preview.example.com/success"
        );

        // No usable request origin: falls back to the static origin
        let urls = config.callback_urls(None);
        assert_eq!(urls.success.unwrap().as_str(), "https://app.example.com/success");
    }

    #[test]
    fn test_api_origin_overrides_everything() {
        let mut config = base_config();
        config.api_origin = Some(url("https://api.example.com"));
        config.callback_policy = CallbackUrlPolicy::RequestOrigin;

        let origin = config.flow_origin(Some(&url("https://preview.example.com")));
        assert_eq!(origin.as_str(), "https://api.example.com/");
    }

    #[test]
    fn test_localhost_base_prefers_request_origin() {
        let config = base_config();

        let origin = config.flow_origin(Some(&url("https://tunnel.example.com")));
        assert_eq!(origin.as_str(), "https://tunnel.example.com/");

        let origin = config.flow_origin(None);
        assert_eq!(origin.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_hosted_api_url_modes() {
        let mut config = base_config();
        assert!(config.hosted_api_url(None).is_none());

        config.upstream = Some(UpstreamCredentials::new(
            url("https://api1.unipile.com:13111"),
            "secret",
        ));
        assert_eq!(
            config.hosted_api_url(None).unwrap().as_str(),
            "http://localhost:3000/"
        );

        config.api_url_mode = ApiUrlMode::Direct;
        assert_eq!(
            config.hosted_api_url(None).unwrap().as_str(),
            "https://api1.unipile.com:13111/"
        );
    }

    #[test]
    fn test_append_path_keeps_base_path() {
        assert_eq!(
            append_path(&url("https://example.com/app/"), "/success").as_str(),
            "https://example.com/app/success"
        );
        assert_eq!(
            append_path(&url("https://example.com"), "unipile/notify").as_str(),
            "https://example.com/unipile/notify"
        );
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("REQUEST".parse(), Ok(CallbackUrlPolicy::RequestOrigin));
        assert_eq!("null".parse(), Ok(CallbackUrlPolicy::None));
        assert_eq!("direct".parse(), Ok(ApiUrlMode::Direct));
        assert_eq!("diagnostic".parse(), Ok(ProxyMode::Diagnostic));
        assert!("sometimes".parse::<ProxyMode>().is_err());
    }

    #[test]
    fn test_debug_masks_secret() {
        let creds = UpstreamCredentials::new(url("https://api.unipile.com"), "top-secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("***"));
    }
}
