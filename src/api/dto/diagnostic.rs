//! Bodies returned by the proxy routes in diagnostic mode.

use serde::Serialize;
use serde_with::skip_serializing_none;

/// Echo of a hosted UI request that was answered locally.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct DiagnosticResponse {
    pub ok: bool,
    pub mode: &'static str,
    pub method: String,
    pub path: String,
    pub upstream_path: String,
    pub query: Option<String>,
    pub origin: Option<String>,
    /// Names of the request headers, never their values.
    pub headers: Vec<String>,
    pub note: &'static str,
}
