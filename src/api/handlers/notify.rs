//! Handler for the upstream notify webhook.

use axum::{
    body::{Bytes, to_bytes},
    extract::Request,
    http::StatusCode,
};
use tracing::{info, warn};

use crate::domain::notify_event::NotifyEvent;

/// Largest notify body that is parsed and logged.
pub const NOTIFY_BODY_LIMIT: usize = 1024 * 1024;

/// Acknowledges an account-linking notification.
///
/// # Endpoint
///
/// `POST /unipile/notify`
///
/// Accepts any body (JSON, text or empty) without schema or signature
/// checks, logs it and always answers `204 No Content`.
///
/// The body is read from the raw request so axum's `DefaultBodyLimit`
/// never turns an oversized payload into a 413. Bodies above
/// [`NOTIFY_BODY_LIMIT`] are acknowledged without being parsed.
pub async fn notify_handler(req: Request) -> StatusCode {
    let body: Bytes = match to_bytes(req.into_body(), NOTIFY_BODY_LIMIT).await {
        Ok(body) => body,
        Err(e) => {
            warn!(
                limit = NOTIFY_BODY_LIMIT,
                "Unipile notify body over limit, payload not logged: {}", e
            );
            Bytes::new()
        }
    };

    let event = NotifyEvent::from_bytes(&body);

    info!(
        account_id = event.account_id().unwrap_or("-"),
        status = event.status().unwrap_or("-"),
        payload = %event.to_log_string(),
        "Unipile notify"
    );

    StatusCode::NO_CONTENT
}
