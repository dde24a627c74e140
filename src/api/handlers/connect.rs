//! Handler for starting a hosted account-linking flow.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Uri},
    response::Redirect,
};
use serde_json::json;
use tracing::warn;

use crate::domain::provider::Provider;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin;

/// Mints a hosted auth link and sends the browser to it.
///
/// # Endpoint
///
/// `GET /connect/{provider}` (e.g. `/connect/linkedin`)
///
/// # Request Flow
///
/// 1. Parse the provider name (case-insensitive)
/// 2. Derive the request origin from `X-Forwarded-*`, `Host` or the URI authority
/// 3. Ask the upstream for a hosted link expiring in 15 minutes
/// 4. Return 307 Temporary Redirect to the hosted UI
///
/// # Errors
///
/// - 400 if upstream credentials are not configured (no upstream call)
/// - 404 for an unknown provider or one outside `HOSTED_PROVIDERS`
/// - 500 if the upstream call fails or returns no URL
pub async fn connect_handler(
    Path(provider): Path<String>,
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let provider = provider.parse::<Provider>().map_err(|e| {
        warn!("Connect requested for unknown provider '{}'", provider);
        AppError::not_found(e.to_string(), json!({ "provider": provider }))
    })?;

    let origin = request_origin(&uri, &headers);
    let url = state
        .link_issuer
        .start_hosted_link(provider, origin.as_ref())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}
