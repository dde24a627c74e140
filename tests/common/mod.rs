#![allow(dead_code)]

use axum::{
    Json, Router,
    body::to_bytes,
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_test::TestServer;
use linkedin_connect::config::Config;
use linkedin_connect::domain::settings::EffectiveConfig;
use linkedin_connect::routes::app_router;
use linkedin_connect::state::AppState;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_API_KEY: &str = "test-unipile-key";
pub const PUBLIC_BASE: &str = "https://connect.example.com";
pub const HOSTED_UI_ORIGIN: &str = "https://account.unipile.com";
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";

/// One request as received by [`FakeUpstream`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn api_key(&self) -> Option<&str> {
        self.headers.get("x-api-key").and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Clone)]
struct FakeState {
    calls: Arc<Mutex<Vec<RecordedRequest>>>,
    link_response: Arc<Mutex<(u16, Value)>>,
}

/// Upstream stand-in bound to an ephemeral local port.
///
/// - `POST /api/v1/hosted/accounts/link` answers with [`FakeUpstream::set_link_response`]
/// - `ANY /status/{code}` answers with that status and an error body
/// - `POST /oauth/v2/accessToken` and `GET /v2/userinfo` mimic LinkedIn
/// - anything else echoes the request, plus headers a proxy must not relay
pub struct FakeUpstream {
    pub base_url: String,
    state: FakeState,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = FakeState {
            calls: Arc::new(Mutex::new(Vec::new())),
            link_response: Arc::new(Mutex::new((
                200,
                json!({ "object": "HostedAuthURL", "url": "https://account.unipile.com/hosted/abc" }),
            ))),
        };

        let app = Router::new()
            .fallback(fake_handler)
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn set_link_response(&self, status: u16, body: Value) {
        *self.state.link_response.lock().unwrap() = (status, body);
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn fake_handler(State(state): State<FakeState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap();

    let path = parts.uri.path().to_string();
    state.calls.lock().unwrap().push(RecordedRequest {
        method: parts.method.clone(),
        path: path.clone(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers.clone(),
        body: body.to_vec(),
    });

    if parts.method == Method::POST && path == "/api/v1/hosted/accounts/link" {
        let (status, body) = state.link_response.lock().unwrap().clone();
        return (StatusCode::from_u16(status).unwrap(), Json(body)).into_response();
    }

    if let Some(code) = path.strip_prefix("/status/") {
        let status = StatusCode::from_u16(code.parse().unwrap()).unwrap();
        return (
            status,
            Json(json!({
                "status": status.as_u16(),
                "type": "errors/forced",
                "title": "Forced failure",
            })),
        )
            .into_response();
    }

    if path == "/oauth/v2/accessToken" {
        return Json(json!({ "access_token": TEST_ACCESS_TOKEN, "expires_in": 3600 }))
            .into_response();
    }

    if path == "/v2/userinfo" {
        let expected = format!("Bearer {}", TEST_ACCESS_TOKEN);
        let authorized = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str());
        if !authorized {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        return Json(json!({ "sub": "abc", "name": "Ada Lovelace" })).into_response();
    }

    (
        [
            ("x-api-key", "upstream-echoed-key"),
            ("access-control-allow-origin", "*"),
            ("connection", "close"),
        ],
        Json(json!({
            "method": parts.method.as_str(),
            "path": path,
            "query": parts.uri.query(),
        })),
    )
        .into_response()
}

/// Listener that accepts connections and never answers.
///
/// Returns its base URL. Accepted sockets are held open so requests hang
/// until the client timeout fires.
pub async fn start_silent_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}", addr)
}

/// Explicit public base, no credentials, short timeout.
pub fn base_config() -> Config {
    Config {
        base_url: Some(PUBLIC_BASE.to_string()),
        upstream_timeout_secs: 5,
        ..Config::default()
    }
}

/// [`base_config`] wired to `upstream` with [`TEST_API_KEY`].
pub fn config_with_upstream(upstream: &FakeUpstream) -> Config {
    Config {
        unipile_dsn: Some(upstream.base_url.clone()),
        unipile_api_key: Some(TEST_API_KEY.to_string()),
        ..base_config()
    }
}

/// [`base_config`] pointed at [`start_silent_upstream`] with a 1s timeout.
pub fn config_with_silent_upstream(base_url: &str) -> Config {
    Config {
        unipile_dsn: Some(base_url.to_string()),
        unipile_api_key: Some(TEST_API_KEY.to_string()),
        upstream_timeout_secs: 1,
        ..base_config()
    }
}

pub fn create_test_server(config: &Config) -> TestServer {
    create_test_server_from(config.resolve())
}

pub fn create_test_server_from(effective: EffectiveConfig) -> TestServer {
    let state = AppState::from_config(effective).unwrap();
    TestServer::new(app_router(state)).unwrap()
}
