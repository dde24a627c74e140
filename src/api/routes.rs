//! API route configuration.
//!
//! Proxy routes are wrapped by [`crate::api::middleware::cors`] in
//! [`crate::routes::app_router`]; public routes carry no CORS headers.

use crate::api::handlers::{
    connect_handler, failure_handler, health_handler, index_handler, linkedin_callback_handler,
    notify_handler, proxy_handler, success_handler,
};
use crate::domain::proxy_route::ProxyRoute;
use crate::domain::settings::{FAILURE_PATH, LINKEDIN_CALLBACK_PATH, NOTIFY_PATH, SUCCESS_PATH};
use crate::state::AppState;
use axum::{
    Extension, Router,
    routing::{any, get, post},
};

/// Browser-facing pages, the hosted flow entry point and the webhook.
///
/// # Endpoints
///
/// - `GET  /`                   - Landing page
/// - `GET  /connect/{provider}` - Start a hosted linking flow (307)
/// - `GET  /success`            - Success page (`?name=`)
/// - `GET  /failure`            - Failure page (`?error=`)
/// - `POST /unipile/notify`     - Upstream notify webhook (204)
/// - `GET  /linkedin/callback`  - Deprecated direct OAuth callback
/// - `GET  /health`             - Integration status
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/connect/{provider}", get(connect_handler))
        .route(SUCCESS_PATH, get(success_handler))
        .route(FAILURE_PATH, get(failure_handler))
        .route(NOTIFY_PATH, post(notify_handler))
        .route(LINKEDIN_CALLBACK_PATH, get(linkedin_callback_handler))
        .route("/health", get(health_handler))
}

/// Catch-all routes for each proxied prefix, any method, any depth.
///
/// Each prefix gets its [`ProxyRoute`] as a request extension so the
/// handler knows whether to strip it.
pub fn proxy_routes(routes: &[ProxyRoute]) -> Router<AppState> {
    routes.iter().fold(Router::new(), |router, route| {
        let scoped = Router::new()
            .route(&route.prefix, any(proxy_handler))
            .route(&format!("{}/", route.prefix), any(proxy_handler))
            .route(&route.wildcard_pattern(), any(proxy_handler))
            .layer(Extension(route.clone()));
        router.merge(scoped)
    })
}
