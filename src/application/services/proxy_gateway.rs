//! Credential-shielding reverse proxy to the upstream API.
//!
//! CORS headers are not handled here; [`crate::api::middleware::cors`] wraps
//! every route under a proxied prefix and owns them.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, header},
    response::Response,
};
use serde_json::json;
use tracing::{info, warn};
use url::Url;

use crate::domain::proxy_route::ProxyRoute;
use crate::domain::settings::{UpstreamCredentials, trim_trailing_slash};
use crate::error::AppError;
use crate::infrastructure::unipile::{API_KEY_HEADER, map_reqwest_error};

/// Largest request body relayed to the upstream.
pub const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Headers that describe a single connection and must not be relayed.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forwards browser requests to the upstream with the shared secret attached.
pub struct ProxyGateway {
    http: reqwest::Client,
    upstream: Option<UpstreamCredentials>,
}

impl ProxyGateway {
    pub fn new(http: reqwest::Client, upstream: Option<UpstreamCredentials>) -> Self {
        Self { http, upstream }
    }

    pub fn is_enabled(&self) -> bool {
        self.upstream.is_some()
    }

    /// Relays `request` (received under `route`) to the upstream.
    ///
    /// The upstream's status and body are returned verbatim, including error
    /// statuses. Only transport failures become [`AppError::ProxyForwardingFailed`].
    ///
    /// # Errors
    ///
    /// - [`AppError::NotConfigured`] without upstream credentials
    /// - [`AppError::NotFound`] if the path is not under `route`
    /// - [`AppError::Validation`] if the body exceeds [`MAX_REQUEST_BODY_BYTES`]
    /// - [`AppError::ProxyForwardingFailed`] on timeout (504) or transport error (502)
    pub async fn forward(&self, route: &ProxyRoute, request: Request) -> Result<Response, AppError> {
        let upstream = self.upstream.as_ref().ok_or_else(|| {
            AppError::not_configured("Server missing UNIPILE_DSN or UNIPILE_API_KEY", json!({}))
        })?;

        let (parts, body) = request.into_parts();

        let upstream_path = route.rewrite(parts.uri.path()).ok_or_else(|| {
            AppError::not_found(
                "Path is not under a proxied prefix",
                json!({ "path": parts.uri.path(), "prefix": route.prefix }),
            )
        })?;
        let target = target_url(&upstream.base_url, &upstream_path, parts.uri.query());

        let mut headers = outbound_headers(&parts.headers);
        let api_key = HeaderValue::from_str(upstream.api_key()).map_err(|_| {
            AppError::internal("Configured API key is not a valid header value", json!({}))
        })?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let body = to_bytes(body, MAX_REQUEST_BODY_BYTES).await.map_err(|_| {
            AppError::bad_request(
                "Request body too large",
                json!({ "limit_bytes": MAX_REQUEST_BODY_BYTES }),
            )
        })?;

        let method = parts.method.clone();
        let upstream_response = self
            .http
            .request(parts.method, &target)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let err = map_reqwest_error(e);
                warn!(%method, path = %upstream_path, error = %err, "Proxy forwarding failed");
                AppError::proxy_failed(&err)
            })?;

        let status = upstream_response.status();
        info!(
            %method,
            path = %upstream_path,
            status = status.as_u16(),
            "Proxied request"
        );

        let headers = inbound_headers(upstream_response.headers());
        let mut response = Response::new(Body::from_stream(upstream_response.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = headers;

        Ok(response)
    }
}

/// `<base><path>?<query>` with exactly one slash between base and path.
pub fn target_url(base: &Url, path: &str, query: Option<&str>) -> String {
    let mut target = format!(
        "{}/{}",
        trim_trailing_slash(base),
        path.trim_start_matches('/')
    );
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    target
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Browser headers relayed upstream: everything except connection-level
/// headers, `Host` and `Content-Length` (recomputed), and any caller-supplied
/// `x-api-key`.
pub fn outbound_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(incoming.len());
    for (name, value) in incoming {
        if is_hop_by_hop(name)
            || *name == header::HOST
            || *name == header::CONTENT_LENGTH
            || name.as_str() == API_KEY_HEADER
        {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// Upstream headers relayed to the browser. The secret header never is.
pub fn inbound_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if is_hop_by_hop(name) || name.as_str() == API_KEY_HEADER {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}
