//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::settings::ProxyMode;
use crate::state::AppState;

/// Returns service health with the state of each integration.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always 200: the process is up. `status` is `degraded` when upstream
/// credentials are missing, since no hosted link can be issued then.
/// Nothing here contacts the upstream.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "upstream": { "status": "ok", "message": "https://api1.unipile.com:13111/" },
///     "linkedin_oauth": { "status": "disabled", "message": "LINKEDIN_CLIENT_ID or LINKEDIN_CLIENT_SECRET missing" },
///     "proxy": { "status": "ok", "message": "forward: /api/v1, /unipile-api" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream = check_upstream(&state);
    let linkedin_oauth = check_linkedin(&state);
    let proxy = check_proxy(&state);

    let healthy = upstream.status == "ok";

    Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            upstream,
            linkedin_oauth,
            proxy,
        },
    })
}

fn check_upstream(state: &AppState) -> CheckStatus {
    match &state.config.upstream {
        Some(upstream) => CheckStatus::ok(upstream.base_url.to_string()),
        None => CheckStatus::disabled("UNIPILE_DSN or UNIPILE_API_KEY missing"),
    }
}

fn check_linkedin(state: &AppState) -> CheckStatus {
    if state.linkedin.is_some() {
        CheckStatus::ok("Deprecated /linkedin/callback enabled")
    } else {
        CheckStatus::disabled("LINKEDIN_CLIENT_ID or LINKEDIN_CLIENT_SECRET missing")
    }
}

fn check_proxy(state: &AppState) -> CheckStatus {
    let prefixes = state
        .config
        .proxy_routes
        .iter()
        .map(|route| route.prefix.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match state.config.proxy_mode {
        ProxyMode::Off => CheckStatus::disabled("PROXY_MODE=off"),
        ProxyMode::Diagnostic => CheckStatus::ok(format!("diagnostic: {}", prefixes)),
        ProxyMode::Forward if state.proxy_gateway.is_enabled() => {
            CheckStatus::ok(format!("forward: {}", prefixes))
        }
        ProxyMode::Forward => CheckStatus::disabled("forward mode without upstream credentials"),
    }
}
