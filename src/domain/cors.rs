//! Fixed CORS policy for responses under the proxied prefixes.
//!
//! Only the hosted UI origin is ever authorized. Upstream CORS headers are
//! replaced, never merged, so the browser sees exactly one value per header.

use axum::http::{HeaderMap, HeaderValue, header};

/// Methods the hosted UI may use.
pub const ALLOW_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";

/// Headers allowed when the preflight does not name any.
pub const DEFAULT_ALLOW_HEADERS: &str = "Content-Type, x-api-key, Authorization, Accept";

/// Preflight cache lifetime in seconds.
pub const MAX_AGE_SECONDS: &str = "600";

/// Error for an origin that cannot be used as a header value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid CORS origin: {0}")]
pub struct InvalidOrigin(pub String);

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

/// Upstream hosted auth UI origin.
pub const DEFAULT_ALLOW_ORIGIN: &str = "https://account.unipile.com";

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static(DEFAULT_ALLOW_ORIGIN),
        }
    }
}

impl CorsPolicy {
    /// Builds a policy authorizing `origin` (trailing slash removed).
    pub fn new(origin: &str) -> Result<Self, InvalidOrigin> {
        let origin = origin.trim().trim_end_matches('/');
        if origin.is_empty() {
            return Err(InvalidOrigin(origin.to_string()));
        }
        let allow_origin =
            HeaderValue::from_str(origin).map_err(|_| InvalidOrigin(origin.to_string()))?;
        Ok(Self { allow_origin })
    }

    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    /// Headers for a locally answered preflight.
    ///
    /// `requested_headers` is the browser's `Access-Control-Request-Headers`;
    /// it is echoed back when present.
    pub fn preflight_headers(&self, requested_headers: Option<&HeaderValue>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        self.overwrite(&mut headers, requested_headers);
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE_SECONDS),
        );
        headers
    }

    /// Replaces any CORS headers in `headers` with this policy's values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        self.overwrite(headers, None);
    }

    fn overwrite(&self, headers: &mut HeaderMap, requested_headers: Option<&HeaderValue>) {
        // insert() drops every previous value for the name
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        let allow_headers = requested_headers
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOW_HEADERS));
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
        ensure_vary_origin(headers);
    }
}

/// Adds `Origin` to `Vary` unless some `Vary` value already lists it.
fn ensure_vary_origin(headers: &mut HeaderMap) {
    let present = headers.get_all(header::VARY).iter().any(|value| {
        value
            .to_str()
            .map(|v| {
                v.split(',')
                    .any(|item| item.trim().eq_ignore_ascii_case("origin") || item.trim() == "*")
            })
            .unwrap_or(false)
    });

    if !present {
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    }
}
