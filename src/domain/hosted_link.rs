//! Hosted auth link request and result.

use chrono::{DateTime, Duration, Utc};
use url::Url;

use crate::domain::provider::Provider;
use crate::domain::settings::CallbackUrls;

/// Lifetime of every hosted auth link, in seconds.
pub const LINK_TTL_SECONDS: i64 = 15 * 60;

/// Everything the upstream needs to mint one hosted auth link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedLinkRequest {
    pub provider: Provider,
    pub expires_at: DateTime<Utc>,
    pub api_url: Url,
    pub success_redirect: Option<Url>,
    pub failure_redirect: Option<Url>,
    pub notify_url: Option<Url>,
}

impl HostedLinkRequest {
    /// Builds a request issued at `now`, expiring [`LINK_TTL_SECONDS`] later.
    pub fn new(provider: Provider, now: DateTime<Utc>, api_url: Url, callbacks: CallbackUrls) -> Self {
        Self {
            provider,
            expires_at: now + Duration::seconds(LINK_TTL_SECONDS),
            api_url,
            success_redirect: callbacks.success,
            failure_redirect: callbacks.failure,
            notify_url: callbacks.notify,
        }
    }
}

/// Upstream answer to a create-link call. A missing `url` is a malformed response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostedLinkResult {
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiry_is_fifteen_minutes() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let request = HostedLinkRequest::new(
            Provider::Linkedin,
            now,
            Url::parse("https://app.example.com").unwrap(),
            CallbackUrls::default(),
        );

        assert_eq!((request.expires_at - now).num_seconds(), 900);
        assert_eq!(request.expires_at.to_rfc3339(), "2026-03-01T12:15:00+00:00");
    }
}
