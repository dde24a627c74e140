//! Fixed CORS policy for the proxied prefixes.

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Answers preflights locally and pins CORS headers on everything else.
///
/// # Behavior
///
/// - `OPTIONS`: `204 No Content` with the hosted UI origin, the allowed
///   methods, the requested (or default) headers and `Access-Control-Max-Age`.
///   The inner handler is not called, so the upstream never sees a preflight.
/// - Any other method: the inner response (forwarded, diagnostic or error)
///   gets its `Access-Control-Allow-*` headers replaced and `Vary: Origin`
///   ensured. Exactly one `Access-Control-Allow-Origin` value is ever sent.
///
/// # Example
///
/// ```rust,ignore
/// let proxied = Router::new()
///     .route("/api/v1/{*rest}", any(proxy_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), cors::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let policy = &st.config.cors;

    if req.method() == Method::OPTIONS {
        let headers =
            policy.preflight_headers(req.headers().get(header::ACCESS_CONTROL_REQUEST_HEADERS));
        return (StatusCode::NO_CONTENT, headers).into_response();
    }

    let mut response = next.run(req).await;
    policy.apply(response.headers_mut());
    response
}
