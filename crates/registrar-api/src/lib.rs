//! # registrar-api — HTTP Service for the Registration Gateway
//!
//! Exposes the `registrar` and `deregistrar` processes in the style of
//! OGC API Processes (synchronous execution only).
//!
//! ## API Surface
//!
//! | Path | Module | Purpose |
//! |------|--------|---------|
//! | `/processes`, `/processes/{id}` | [`routes::processes`] | Discovery |
//! | `/processes/{id}/execution` | [`routes::processes`] | Execution |
//! | `/openapi.json` | [`openapi`] | OpenAPI document |
//! | `/metrics` | [`middleware::metrics`] | Prometheus metrics |
//! | `/health/*` | this module | Liveness and readiness |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Request metrics are recorded into `state.metrics`.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let api = Router::new()
        .merge(routes::processes::router())
        .merge(openapi::router())
        .route("/metrics", get(prometheus_metrics))
        .route_layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(CorsLayer::permissive())
        .layer(Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Bind `0.0.0.0:port` and serve until the process exits.
pub async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "registration API listening");
    axum::serve(listener, app(state)).await
}

/// Liveness check. Always 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check. State is fully built before the router is, so this
/// always returns 200.
async fn readiness() -> &'static str {
    "ready"
}

/// GET /metrics — Prometheus scrape endpoint (text exposition format).
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                e,
            )
        }
    }
}
