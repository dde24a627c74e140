//! Shared outbound HTTP client.

use reqwest::redirect::Policy;
use std::time::Duration;

/// Builds the one `reqwest` client used for every upstream call.
///
/// - TLS certificates are always verified (rustls with webpki roots).
/// - Redirects are returned to the caller instead of being followed, so the
///   proxy relays upstream `3xx` responses verbatim.
/// - Every request is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(Policy::none())
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
