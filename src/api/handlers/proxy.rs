//! Handler for every request under a proxied prefix.

use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{Method, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::diagnostic::DiagnosticResponse;
use crate::domain::proxy_route::ProxyRoute;
use crate::domain::settings::ProxyMode;
use crate::error::AppError;
use crate::state::AppState;

/// Upstream path answered with an echo in diagnostic mode.
pub const AUTH_PAYLOAD_PATH: &str = "/api/v1/hosted/accounts/auth_payload";

/// Relays a hosted UI request according to `PROXY_MODE`.
///
/// # Endpoint
///
/// `ANY <prefix>/*` for each configured prefix (`/api/v1`, `/unipile-api`).
/// Preflights never reach this handler, see [`crate::api::middleware::cors`].
///
/// # Modes
///
/// - `forward`: streamed to the upstream with the API key attached
/// - `diagnostic`: answered locally, the upstream is never contacted
/// - `off`: routes are not mounted; answers 404 if reached anyway
///
/// # Errors
///
/// - 400 if upstream credentials are not configured
/// - 502 / 504 on transport failure or timeout
///
/// Upstream HTTP errors are not errors here: they pass through verbatim.
pub async fn proxy_handler(
    State(state): State<AppState>,
    Extension(route): Extension<ProxyRoute>,
    req: Request,
) -> Result<Response, AppError> {
    match state.config.proxy_mode {
        ProxyMode::Forward => state.proxy_gateway.forward(&route, req).await,
        ProxyMode::Diagnostic => Ok(diagnostic_response(&route, &req).into_response()),
        ProxyMode::Off => Err(AppError::not_found(
            "Proxy is disabled",
            json!({ "path": req.uri().path() }),
        )),
    }
}

/// Local answer used in diagnostic mode.
///
/// `GET .../auth_payload` is echoed back in detail; any other path gets a
/// generic acknowledgement with the same shape.
pub fn diagnostic_response(route: &ProxyRoute, req: &Request) -> Json<DiagnosticResponse> {
    let path = req.uri().path().to_string();
    let upstream_path = route.rewrite(&path).unwrap_or_else(|| path.clone());

    let note = if req.method() == Method::GET && upstream_path == AUTH_PAYLOAD_PATH {
        "auth_payload echoed locally"
    } else {
        "acknowledged locally, upstream not contacted"
    };

    let mut headers: Vec<String> = req
        .headers()
        .keys()
        .map(|name| name.as_str().to_string())
        .collect();
    headers.sort();
    headers.dedup();

    Json(DiagnosticResponse {
        ok: true,
        mode: "diagnostic",
        method: req.method().to_string(),
        path,
        upstream_path,
        query: req.uri().query().map(str::to_string),
        origin: req
            .headers()
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        headers,
        note,
    })
}
