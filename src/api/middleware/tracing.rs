//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Request span that records the URI path only.
///
/// Query strings are left out: `/linkedin/callback?code=...` and proxied
/// hosted-UI calls carry credentials there.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSpan;

impl<B> MakeSpan<B> for PathSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            version = ?request.version(),
        )
    }
}

/// Creates a tracing middleware for HTTP requests.
///
/// Wraps every route, including forwarded proxy traffic and the static
/// fallback. Spans never record headers or query strings, so `x-api-key`
/// and OAuth codes stay out of logs.
///
/// # Logging Behavior
///
/// **On Request:**
/// - Creates a span at `INFO` level with:
///   - HTTP method
///   - URI path
///   - HTTP version
///
/// **On Response:**
/// - Logs at `INFO` level with:
///   - Status code
///   - Latency in milliseconds
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET path=/connect/linkedin version=HTTP/1.1}: finished processing request latency=412 ms status=307
/// INFO request{method=OPTIONS path=/api/v1/hosted/accounts version=HTTP/1.1}: finished processing request latency=0 ms status=204
/// ```
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .merge(api::routes::public_routes())
///     .layer(tracing::layer());
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, PathSpan> {
    TraceLayer::new_for_http().make_span_with(PathSpan).on_response(
        DefaultOnResponse::new()
            .level(Level::INFO)
            .latency_unit(LatencyUnit::Millis),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_span_omits_query_string() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let request = Request::builder()
            .uri("/linkedin/callback?code=secret-oauth-code&state=xyz")
            .body(())
            .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            let span = PathSpan.make_span(&request);
            let _guard = span.enter();
            tracing::info!("handled");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("path=/linkedin/callback"), "{output}");
        assert!(!output.contains("secret-oauth-code"), "{output}");
    }
}
