//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`, `/success`, `/failure` - HTML pages
//! - `GET  /connect/{provider}`       - Hosted linking flow
//! - `POST /unipile/notify`           - Upstream webhook
//! - `GET  /linkedin/callback`        - Deprecated OAuth callback
//! - `GET  /health`                   - Integration status
//! - `/api/v1/*`, `/unipile-api/*`    - Credential-shielding proxy (CORS)
//! - anything else                    - Static files from `public/`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging on every route
//! - **CORS** - Fixed hosted UI origin on proxied routes only

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::domain::settings::ProxyMode;
use crate::state::AppState;
use axum::{Router, middleware};
use tower_http::services::ServeDir;

/// Directory served for paths no route claims.
pub const PUBLIC_DIR: &str = "public";

/// Constructs the application router with all routes and middleware.
///
/// Proxy routes are mounted only when `PROXY_MODE` is not `off`.
pub fn app_router(state: AppState) -> Router {
    let mut router = api::routes::public_routes();

    if state.config.proxy_mode != ProxyMode::Off && !state.config.proxy_routes.is_empty() {
        let proxied = api::routes::proxy_routes(&state.config.proxy_routes)
            .route_layer(middleware::from_fn_with_state(state.clone(), cors::layer));
        router = router.merge(proxied);
    }

    router
        .fallback_service(ServeDir::new(PUBLIC_DIR))
        .with_state(state)
        .layer(tracing::layer())
}
