//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup ([`Config::from_env`]), validated
//! ([`Config::validate`]) and then resolved into the immutable
//! [`EffectiveConfig`] every component shares ([`Config::resolve`]).
//!
//! Missing values never fail startup: without Unipile credentials the hosted
//! flow and the proxy report "not configured", without LinkedIn credentials
//! the deprecated callback does. Only malformed values that *are* present
//! (bad port, unknown mode name, ...) are rejected.
//!
//! ## Public origin
//!
//! 1. `BASE_URL`
//! 2. `https://$VERCEL_URL` (deployment host)
//! 3. `http://localhost:$PORT`
//!
//! `API_ORIGIN` overrides the public origin for hosted-flow URLs only.
//!
//! ## Variables
//!
//! - `PORT` - Listen port (default: `3000`)
//! - `LISTEN_HOST` - Bind host (default: `0.0.0.0`)
//! - `BASE_URL`, `VERCEL_URL`, `API_ORIGIN` - Public origin, see above
//! - `UNIPILE_DSN`, `UNIPILE_API_KEY` - Upstream identity and shared secret
//! - `LINKEDIN_CLIENT_ID`, `LINKEDIN_CLIENT_SECRET`, `LINKEDIN_REDIRECT_URI` -
//!   Deprecated direct OAuth flow
//! - `SUCCESS_URL`, `FAILURE_URL`, `NOTIFY_URL` - Explicit callback URLs
//! - `CALLBACK_URL_MODE` - `static`, `none` or `request` (default: `static`)
//! - `API_URL_MODE` - `proxy` or `direct` (default: `proxy`)
//! - `PROXY_MODE` - `forward`, `diagnostic` or `off` (default: `forward`).
//!   `off` requires `API_URL_MODE=direct`
//! - `PROXY_PREFIXES` - Comma-separated proxied prefixes, `:strip` removes the
//!   prefix before forwarding (default: `/api/v1,/unipile-api:strip`)
//! - `HOSTED_UI_ORIGIN` - Only origin allowed by CORS on proxied routes
//!   (default: `https://account.unipile.com`)
//! - `HOSTED_PROVIDERS` - Comma-separated providers (default: `LINKEDIN`)
//! - `UPSTREAM_TIMEOUT_SECS` - Upstream call timeout (default: `30`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use regex::Regex;
use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

use crate::domain::cors::CorsPolicy;
use crate::domain::provider::Provider;
use crate::domain::proxy_route::ProxyRoute;
use crate::domain::settings::{
    ApiUrlMode, BaseUrlSource, CallbackUrlPolicy, EffectiveConfig, FAILURE_PATH,
    LINKEDIN_CALLBACK_PATH, LinkedInApp, NOTIFY_PATH, ProxyMode, SUCCESS_PATH,
    UpstreamCredentials, append_path,
};

/// Default origin of the upstream's hosted auth UI.
pub const DEFAULT_HOSTED_UI_ORIGIN: &str = crate::domain::cors::DEFAULT_ALLOW_ORIGIN;

/// LinkedIn OAuth2 token endpoint.
pub const LINKEDIN_TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";

/// LinkedIn OpenID Connect userinfo endpoint.
pub const LINKEDIN_USERINFO_URL: &str = "https://api.linkedin.com/v2/userinfo";

/// Environment files tried in order; the first one found is loaded.
pub const ENV_FILES: &[&str] = &[".env", "env.local"];

/// Public routes a proxy prefix must not shadow.
const PUBLIC_PATHS: &[&str] = &[
    "/connect",
    SUCCESS_PATH,
    FAILURE_PATH,
    NOTIFY_PATH,
    LINKEDIN_CALLBACK_PATH,
    "/health",
];

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme regex is valid"));

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub listen_host: String,
    pub base_url: Option<String>,
    /// Deployment host without scheme (`VERCEL_URL`).
    pub deployment_host: Option<String>,
    pub api_origin: Option<String>,
    pub unipile_dsn: Option<String>,
    pub unipile_api_key: Option<String>,
    pub linkedin_client_id: Option<String>,
    pub linkedin_client_secret: Option<String>,
    pub linkedin_redirect_uri: Option<String>,
    pub success_url: Option<String>,
    pub failure_url: Option<String>,
    pub notify_url: Option<String>,
    pub callback_url_mode: CallbackUrlPolicy,
    pub api_url_mode: ApiUrlMode,
    pub proxy_mode: ProxyMode,
    pub proxy_routes: Vec<ProxyRoute>,
    pub hosted_ui_origin: String,
    pub hosted_providers: Vec<Provider>,
    pub upstream_timeout_secs: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            listen_host: "0.0.0.0".to_string(),
            base_url: None,
            deployment_host: None,
            api_origin: None,
            unipile_dsn: None,
            unipile_api_key: None,
            linkedin_client_id: None,
            linkedin_client_secret: None,
            linkedin_redirect_uri: None,
            success_url: None,
            failure_url: None,
            notify_url: None,
            callback_url_mode: CallbackUrlPolicy::Static,
            api_url_mode: ApiUrlMode::Proxy,
            proxy_mode: ProxyMode::Forward,
            proxy_routes: ProxyRoute::defaults(),
            hosted_ui_origin: DEFAULT_HOSTED_UI_ORIGIN.to_string(),
            hosted_providers: vec![Provider::Linkedin],
            upstream_timeout_secs: 30,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Reads a variable, treating empty values as unset.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", v))?,
            None => defaults.port,
        };

        let callback_url_mode = match var("CALLBACK_URL_MODE") {
            Some(v) => v.parse()?,
            None => defaults.callback_url_mode,
        };
        let api_url_mode = match var("API_URL_MODE") {
            Some(v) => v.parse()?,
            None => defaults.api_url_mode,
        };
        let proxy_mode = match var("PROXY_MODE") {
            Some(v) => v.parse()?,
            None => defaults.proxy_mode,
        };

        let proxy_routes = match var("PROXY_PREFIXES") {
            Some(v) => ProxyRoute::parse_list(&v).context("Invalid PROXY_PREFIXES")?,
            None => defaults.proxy_routes,
        };

        let hosted_providers = match var("HOSTED_PROVIDERS") {
            Some(v) => parse_providers(&v).context("Invalid HOSTED_PROVIDERS")?,
            None => defaults.hosted_providers,
        };

        let upstream_timeout_secs = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("UPSTREAM_TIMEOUT_SECS must be an integer, got '{}'", v))?,
            None => defaults.upstream_timeout_secs,
        };

        Ok(Self {
            port,
            listen_host: var("LISTEN_HOST").unwrap_or(defaults.listen_host),
            base_url: var("BASE_URL"),
            deployment_host: var("VERCEL_URL"),
            api_origin: var("API_ORIGIN"),
            unipile_dsn: var("UNIPILE_DSN"),
            unipile_api_key: var("UNIPILE_API_KEY"),
            linkedin_client_id: var("LINKEDIN_CLIENT_ID"),
            linkedin_client_secret: var("LINKEDIN_CLIENT_SECRET"),
            linkedin_redirect_uri: var("LINKEDIN_REDIRECT_URI"),
            success_url: var("SUCCESS_URL"),
            failure_url: var("FAILURE_URL"),
            notify_url: var("NOTIFY_URL"),
            callback_url_mode,
            api_url_mode,
            proxy_mode,
            proxy_routes,
            hosted_ui_origin: var("HOSTED_UI_ORIGIN").unwrap_or(defaults.hosted_ui_origin),
            hosted_providers,
            upstream_timeout_secs,
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: var("LOG_FORMAT").unwrap_or(defaults.log_format),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `upstream_timeout_secs` is 0 or above 300
    /// - `hosted_ui_origin` is not a usable header value
    /// - `hosted_providers` is empty
    /// - `PROXY_MODE=off` is combined with `API_URL_MODE=proxy`
    /// - proxy prefixes overlap each other or a public route
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.upstream_timeout_secs == 0 || self.upstream_timeout_secs > 300 {
            anyhow::bail!(
                "UPSTREAM_TIMEOUT_SECS must be between 1 and 300, got {}",
                self.upstream_timeout_secs
            );
        }

        CorsPolicy::new(&self.hosted_ui_origin).context("Invalid HOSTED_UI_ORIGIN")?;

        if self.hosted_providers.is_empty() {
            anyhow::bail!("HOSTED_PROVIDERS must name at least one provider");
        }

        if let Some(key) = &self.unipile_api_key
            && axum::http::HeaderValue::from_str(key).is_err()
        {
            anyhow::bail!("UNIPILE_API_KEY contains characters not allowed in a header");
        }

        if self.proxy_mode == ProxyMode::Off && self.api_url_mode == ApiUrlMode::Proxy {
            anyhow::bail!(
                "PROXY_MODE=off requires API_URL_MODE=direct, hosted links would point at unmounted proxy prefixes"
            );
        }

        self.validate_proxy_routes()?;

        Ok(())
    }

    fn validate_proxy_routes(&self) -> Result<()> {
        if self.proxy_mode != ProxyMode::Off && self.proxy_routes.is_empty() {
            anyhow::bail!("PROXY_PREFIXES must name at least one prefix");
        }

        for (i, route) in self.proxy_routes.iter().enumerate() {
            if let Some(other) = self.proxy_routes[i + 1..].iter().find(|r| r.overlaps(route)) {
                anyhow::bail!(
                    "PROXY_PREFIXES entries '{}' and '{}' overlap",
                    route.prefix,
                    other.prefix
                );
            }

            if let Some(path) = PUBLIC_PATHS
                .iter()
                .find(|path| route.overlaps(&ProxyRoute::new(**path, false)))
            {
                anyhow::bail!(
                    "PROXY_PREFIXES entry '{}' overlaps the public route '{}'",
                    route.prefix,
                    path
                );
            }
        }

        Ok(())
    }

    /// Bind address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.port)
    }

    /// Applies precedence rules and builds the shared [`EffectiveConfig`].
    ///
    /// Never fails. Unparseable optional URLs are logged and ignored.
    pub fn resolve(&self) -> EffectiveConfig {
        let (public_base_url, base_url_source) = self.resolve_public_base();

        let upstream = match (&self.unipile_dsn, &self.unipile_api_key) {
            (Some(dsn), Some(key)) => match normalize_dsn(dsn) {
                Some(base_url) => Some(UpstreamCredentials::new(base_url, key.clone())),
                None => {
                    tracing::warn!("UNIPILE_DSN '{}' is not a valid host or URL", dsn);
                    None
                }
            },
            _ => {
                tracing::warn!(
                    "UNIPILE_DSN or UNIPILE_API_KEY missing. Set them in .env or env.local to enable the connect flow."
                );
                None
            }
        };

        let linkedin = match (&self.linkedin_client_id, &self.linkedin_client_secret) {
            (Some(id), Some(secret)) => {
                let redirect_uri = self
                    .linkedin_redirect_uri
                    .as_deref()
                    .and_then(|v| parse_optional_url("LINKEDIN_REDIRECT_URI", v))
                    .unwrap_or_else(|| append_path(&public_base_url, LINKEDIN_CALLBACK_PATH));
                Some(LinkedInApp::new(
                    id.clone(),
                    secret.clone(),
                    redirect_uri,
                    static_url(LINKEDIN_TOKEN_URL),
                    static_url(LINKEDIN_USERINFO_URL),
                ))
            }
            _ => {
                tracing::warn!(
                    "LINKEDIN_CLIENT_ID or LINKEDIN_CLIENT_SECRET missing. /linkedin/callback is disabled."
                );
                None
            }
        };

        let cors = CorsPolicy::new(&self.hosted_ui_origin).unwrap_or_else(|e| {
            tracing::warn!("{}. Falling back to {}", e, DEFAULT_HOSTED_UI_ORIGIN);
            CorsPolicy::default()
        });

        EffectiveConfig {
            public_base_url,
            base_url_source,
            api_origin: self
                .api_origin
                .as_deref()
                .and_then(|v| parse_optional_url("API_ORIGIN", v)),
            upstream,
            success_url: self
                .success_url
                .as_deref()
                .and_then(|v| parse_optional_url("SUCCESS_URL", v)),
            failure_url: self
                .failure_url
                .as_deref()
                .and_then(|v| parse_optional_url("FAILURE_URL", v)),
            notify_url: self
                .notify_url
                .as_deref()
                .and_then(|v| parse_optional_url("NOTIFY_URL", v)),
            callback_policy: self.callback_url_mode,
            api_url_mode: self.api_url_mode,
            proxy_mode: self.proxy_mode,
            proxy_routes: self.proxy_routes.clone(),
            cors,
            providers: self.hosted_providers.clone(),
            linkedin,
            upstream_timeout: Duration::from_secs(self.upstream_timeout_secs),
        }
    }

    /// `BASE_URL`, then the deployment host forced to https, then localhost.
    fn resolve_public_base(&self) -> (Url, BaseUrlSource) {
        if let Some(url) = self
            .base_url
            .as_deref()
            .and_then(|v| parse_optional_url("BASE_URL", v))
        {
            return (url, BaseUrlSource::Explicit);
        }

        if let Some(host) = &self.deployment_host {
            let host = SCHEME_RE.replace(host, "");
            if let Some(url) = parse_optional_url("VERCEL_URL", &format!("https://{}", host)) {
                return (url, BaseUrlSource::Deployment);
            }
        }

        (
            static_url(&format!("http://localhost:{}", self.port)),
            BaseUrlSource::Localhost,
        )
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self, effective: &EffectiveConfig) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr());
        tracing::info!(
            "  Public base URL: {} ({:?})",
            effective.public_base_url,
            effective.base_url_source
        );

        if let Some(origin) = &effective.api_origin {
            tracing::info!("  API origin override: {}", origin);
        }

        match &effective.upstream {
            Some(upstream) => tracing::info!(
                "  Upstream: {} (key {})",
                upstream.base_url,
                mask_secret(upstream.api_key())
            ),
            None => tracing::info!("  Upstream: not configured"),
        }

        tracing::info!("  Callback URL mode: {:?}", effective.callback_policy);
        tracing::info!("  API URL mode: {:?}", effective.api_url_mode);
        tracing::info!("  Proxy mode: {:?}", effective.proxy_mode);
        tracing::info!(
            "  Hosted UI origin: {}",
            effective.cors.allow_origin().to_str().unwrap_or("<invalid>")
        );
        tracing::info!(
            "  LinkedIn OAuth: {}",
            if effective.linkedin.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Upstream base URL from a DSN that may or may not carry a scheme.
///
/// `api1.unipile.com:13111` becomes `https://api1.unipile.com:13111`; a DSN
/// that already starts with `http://` or `https://` is used verbatim.
pub fn normalize_dsn(dsn: &str) -> Option<Url> {
    let dsn = dsn.trim();
    if dsn.is_empty() {
        return None;
    }

    let candidate = if SCHEME_RE.is_match(dsn) {
        dsn.to_string()
    } else {
        format!("https://{}", dsn)
    };

    Url::parse(&candidate).ok().filter(|url| url.has_host())
}

/// Parses a comma-separated provider list.
pub fn parse_providers(value: &str) -> Result<Vec<Provider>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<Provider>().map_err(anyhow::Error::from))
        .collect()
}

fn parse_optional_url(name: &str, value: &str) -> Option<Url> {
    match Url::parse(value) {
        Ok(url) if url.has_host() => Some(url),
        _ => {
            tracing::warn!("{} '{}' is not an absolute URL, ignoring it", name, value);
            None
        }
    }
}

fn static_url(value: &str) -> Url {
    Url::parse(value).expect("built-in URL is valid")
}

/// Masks a secret for logging, keeping the first four characters.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "***".to_string()
    } else {
        format!("{}***", visible)
    }
}

/// Loads the first environment file found in [`ENV_FILES`].
///
/// Returns the loaded path, or `None` when no file exists and only the
/// process environment is used.
pub fn load_env_files() -> Option<PathBuf> {
    ENV_FILES.iter().find_map(|name| dotenvy::from_filename(name).ok())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if present variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment files to be already loaded
/// (see [`load_env_files`]).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_normalize_dsn() {
        assert_eq!(
            normalize_dsn("api1.unipile.com:13111").unwrap().as_str(),
            "https://api1.unipile.com:13111/"
        );
        assert_eq!(
            normalize_dsn("HTTP://127.0.0.1:8080").unwrap().as_str(),
            "http://127.0.0.1:8080/"
        );
        assert_eq!(
            normalize_dsn("https://api2.unipile.com:13222/").unwrap().as_str(),
            "https://api2.unipile.com:13222/"
        );
        assert!(normalize_dsn("   ").is_none());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh"), "abcd***");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("abcd"), "***");
        assert_eq!(mask_secret("abcde"), "abcd***");
    }

    #[test]
    fn test_public_base_precedence() {
        let mut config = Config {
            port: 4000,
            ..Config::default()
        };
        let effective = config.resolve();
        assert_eq!(effective.public_base_url.as_str(), "http://localhost:4000/");
        assert_eq!(effective.base_url_source, BaseUrlSource::Localhost);

        config.deployment_host = Some("my-app.vercel.app".to_string());
        let effective = config.resolve();
        assert_eq!(effective.public_base_url.as_str(), "https://my-app.vercel.app/");
        assert_eq!(effective.base_url_source, BaseUrlSource::Deployment);

        config.base_url = Some("https://connect.example.com".to_string());
        let effective = config.resolve();
        assert_eq!(effective.public_base_url.as_str(), "https://connect.example.com/");
        assert_eq!(effective.base_url_source, BaseUrlSource::Explicit);
    }

    #[test]
    fn test_deployment_host_forced_to_https() {
        let config = Config {
            deployment_host: Some("http://my-app.vercel.app".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve().public_base_url.as_str(),
            "https://my-app.vercel.app/"
        );
    }

    #[test]
    fn test_invalid_base_url_falls_through() {
        let config = Config {
            base_url: Some("not a url".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve().base_url_source,
            BaseUrlSource::Localhost
        );
    }

    #[test]
    fn test_missing_credentials_disable_upstream() {
        let config = Config {
            unipile_dsn: Some("api1.unipile.com:13111".to_string()),
            ..Config::default()
        };
        let effective = config.resolve();
        assert!(effective.upstream.is_none());
        assert!(effective.linkedin.is_none());
    }

    #[test]
    fn test_upstream_and_linkedin_resolved() {
        let config = Config {
            base_url: Some("https://connect.example.com".to_string()),
            unipile_dsn: Some("api1.unipile.com:13111".to_string()),
            unipile_api_key: Some("key".to_string()),
            linkedin_client_id: Some("client".to_string()),
            linkedin_client_secret: Some("secret".to_string()),
            ..Config::default()
        };
        let effective = config.resolve();

        let upstream = effective.upstream.unwrap();
        assert_eq!(upstream.base_url.as_str(), "https://api1.unipile.com:13111/");
        assert_eq!(upstream.api_key(), "key");

        let linkedin = effective.linkedin.unwrap();
        assert_eq!(
            linkedin.redirect_uri.as_str(),
            "https://connect.example.com/linkedin/callback"
        );
        assert_eq!(linkedin.token_url.as_str(), LINKEDIN_TOKEN_URL);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.upstream_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.upstream_timeout_secs = 30;

        config.hosted_ui_origin = " ".to_string();
        assert!(config.validate().is_err());
        config.hosted_ui_origin = DEFAULT_HOSTED_UI_ORIGIN.to_string();

        config.hosted_providers.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_proxy_off_requires_direct_api_url() {
        let mut config = Config {
            proxy_mode: ProxyMode::Off,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        config.api_url_mode = ApiUrlMode::Direct;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_proxy_prefixes_validation() {
        let mut config = Config {
            proxy_routes: vec![ProxyRoute::new("/gateway", true)],
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        config.proxy_routes = vec![ProxyRoute::new("/unipile", true)];
        assert!(config.validate().is_err());

        config.proxy_routes = vec![ProxyRoute::new("/health/upstream", false)];
        assert!(config.validate().is_err());

        config.proxy_routes = vec![
            ProxyRoute::new("/api", false),
            ProxyRoute::new("/api/v1", false),
        ];
        assert!(config.validate().is_err());

        config.proxy_routes.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_providers() {
        assert_eq!(
            parse_providers("linkedin, WHATSAPP,").unwrap(),
            vec![Provider::Linkedin, Provider::Whatsapp]
        );
        assert!(parse_providers("LINKEDIN,FAX").is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("PORT", "8080");
            env::set_var("UNIPILE_DSN", "api3.unipile.com:13333");
            env::set_var("UNIPILE_API_KEY", "from-env");
            env::set_var("CALLBACK_URL_MODE", "request");
            env::set_var("API_URL_MODE", "direct");
            env::set_var("SUCCESS_URL", "");
            env::set_var("PROXY_PREFIXES", "/api/v1,/gateway:strip");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.unipile_dsn.as_deref(), Some("api3.unipile.com:13333"));
        assert_eq!(config.callback_url_mode, CallbackUrlPolicy::RequestOrigin);
        assert_eq!(config.api_url_mode, ApiUrlMode::Direct);
        // Empty values count as unset
        assert!(config.success_url.is_none());
        assert_eq!(
            config.proxy_routes,
            vec![
                ProxyRoute::new("/api/v1", false),
                ProxyRoute::new("/gateway", true)
            ]
        );

        // Cleanup
        unsafe {
            env::remove_var("PORT");
            env::remove_var("UNIPILE_DSN");
            env::remove_var("UNIPILE_API_KEY");
            env::remove_var("CALLBACK_URL_MODE");
            env::remove_var("API_URL_MODE");
            env::remove_var("SUCCESS_URL");
            env::remove_var("PROXY_PREFIXES");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PROXY_MODE", "sometimes");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("PROXY_MODE");
            env::set_var("PORT", "eighty");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("PORT");
            env::set_var("PROXY_PREFIXES", "/api,/api/v1");
        }
        assert!(Config::from_env().is_err());

        // Cleanup
        unsafe {
            env::remove_var("PROXY_PREFIXES");
        }
    }
}
