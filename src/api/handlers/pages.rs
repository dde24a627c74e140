//! Browser-facing HTML pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::api::dto::callback::{FailureQuery, SuccessQuery};
use crate::state::AppState;

/// One "connect" button on the index page.
pub struct ProviderLink {
    pub label: String,
    pub href: String,
}

/// Template for the landing page.
///
/// Renders `templates/index.html` with one connect link per enabled
/// provider and a notice when the upstream is not configured.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub providers: Vec<ProviderLink>,
    pub upstream_configured: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "success.html")]
pub struct SuccessTemplate {
    pub name: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "failure.html")]
pub struct FailureTemplate {
    pub error: Option<String>,
}

/// Renders the landing page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let providers = state
        .config
        .providers
        .iter()
        .map(|provider| ProviderLink {
            label: provider.as_str().to_string(),
            href: format!("/connect/{}", provider.as_str().to_ascii_lowercase()),
        })
        .collect();

    IndexTemplate {
        providers,
        upstream_configured: state.config.is_upstream_configured(),
    }
}

/// Renders the page the hosted UI sends the browser to after linking.
///
/// # Endpoint
///
/// `GET /success?name=<display name>`
pub async fn success_handler(Query(query): Query<SuccessQuery>) -> impl IntoResponse {
    SuccessTemplate {
        name: query.name.filter(|n| !n.trim().is_empty()),
    }
}

/// Renders the page shown when linking failed or was cancelled.
///
/// # Endpoint
///
/// `GET /failure?error=<code>`
pub async fn failure_handler(Query(query): Query<FailureQuery>) -> impl IntoResponse {
    FailureTemplate {
        error: query.error.filter(|e| !e.trim().is_empty()),
    }
}
