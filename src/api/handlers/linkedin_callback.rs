//! Deprecated direct LinkedIn OAuth callback.
//!
//! Kept for debugging the LinkedIn app registration. The supported flow is
//! the hosted one started at `/connect/{provider}`.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use tracing::{info, warn};
use url::form_urlencoded;

use crate::api::dto::callback::LinkedInCallbackQuery;
use crate::domain::settings::{FAILURE_PATH, SUCCESS_PATH};
use crate::state::AppState;

/// Completes the authorization-code flow and redirects to a result page.
///
/// # Endpoint
///
/// `GET /linkedin/callback?code=...&state=...`
///
/// # Request Flow
///
/// 1. Exchange `code` at the LinkedIn token endpoint
/// 2. Fetch the OpenID Connect `userinfo` with the access token
/// 3. Redirect to `/success?name=<display name>`
///
/// Never answers with an error status: every failure redirects to
/// `/failure?error=<code>` where `code` is the provider's own error
/// (e.g. `access_denied`), `missing_code`, `not_configured`,
/// `token_exchange_failed` or `profile_fetch_failed`.
pub async fn linkedin_callback_handler(
    State(state): State<AppState>,
    Query(query): Query<LinkedInCallbackQuery>,
) -> Redirect {
    if let Some(error) = query.error.as_deref().filter(|e| !e.is_empty()) {
        warn!(
            error,
            description = query.error_description.as_deref().unwrap_or("-"),
            "LinkedIn returned an OAuth error"
        );
        return failure_redirect(error);
    }

    let Some(code) = query.code.as_deref().filter(|c| !c.is_empty()) else {
        return failure_redirect("missing_code");
    };

    let Some(client) = &state.linkedin else {
        warn!("LinkedIn callback hit but LinkedIn credentials are not configured");
        return failure_redirect("not_configured");
    };

    let profile = match client.exchange_code(code).await {
        Ok(token) => client.fetch_profile(&token).await,
        Err(e) => Err(e),
    };

    match profile {
        Ok(profile) => {
            let name = profile.display_name();
            info!(
                state = query.state.as_deref().unwrap_or("-"),
                "LinkedIn OAuth completed"
            );
            Redirect::temporary(&with_query(SUCCESS_PATH, "name", &name))
        }
        Err(e) => {
            warn!(error = %e, "LinkedIn OAuth failed");
            failure_redirect(e.code())
        }
    }
}

fn failure_redirect(code: &str) -> Redirect {
    Redirect::temporary(&with_query(FAILURE_PATH, "error", code))
}

fn with_query(path: &str, key: &str, value: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{}?{}", path, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_value() {
        assert_eq!(
            with_query("/success", "name", "Ada Lovelace & co"),
            "/success?name=Ada+Lovelace+%26+co"
        );
    }
}
