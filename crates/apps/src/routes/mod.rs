//! HTTP route handlers for the invoke host.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Health check
//! GET  /live/_meta          - Installed apps and configured manifests
//! POST /live/invoke         - Batch invoke: {name: {key, props}} -> {name: output}
//! POST /live/invoke/{*key}  - Invoke one block; body is its props
//! ```

pub mod invoke;
pub mod meta;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// The `/live` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/live/_meta", get(meta::meta))
        .route("/live/invoke", post(invoke::invoke_batch))
        .route("/live/invoke/{*key}", post(invoke::invoke))
}

/// Full application router with tracing and request ids, ready to serve.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
