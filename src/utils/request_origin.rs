//! Origin of the incoming request, as seen by the browser.

use axum::http::{HeaderMap, HeaderName, Uri, header};
use url::Url;

const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Reconstructs `scheme://host[:port]` from the request target and headers.
///
/// Uses `X-Forwarded-Host` / `X-Forwarded-Proto` when a reverse proxy set
/// them, then `Host`, then the URI authority (HTTP/2 `:authority`). The
/// scheme falls back to the URI scheme, then `http`. Only the first value
/// of a comma-separated forwarded list is considered.
///
/// Returns `None` if no host is present or the result is not a valid URL.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "connect.example.com".parse().unwrap());
/// headers.insert("x-forwarded-proto", "https".parse().unwrap());
///
/// let origin = request_origin(&Uri::from_static("/"), &headers).unwrap();
/// assert_eq!(origin.as_str(), "https://connect.example.com/");
/// ```
pub fn request_origin(uri: &Uri, headers: &HeaderMap) -> Option<Url> {
    let host = first_value(headers, &X_FORWARDED_HOST)
        .or_else(|| first_value(headers, &header::HOST))
        .or_else(|| uri.authority().map(|a| a.as_str()))?;

    let proto = first_value(headers, &X_FORWARDED_PROTO).or_else(|| uri.scheme_str());
    let scheme = match proto {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };

    Url::parse(&format!("{}://{}", scheme, host))
        .ok()
        .filter(|url| url.has_host() && url.path() == "/")
}

fn first_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
