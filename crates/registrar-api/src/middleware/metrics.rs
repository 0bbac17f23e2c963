//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Process executions are counted by outcome from the execute
//! handler. `GET /metrics` serves the registry in Prometheus text format.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::core::Collector;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Label used for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,
    process_executions_total: IntCounterVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a metrics instance with a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("registrar_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "registrar_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
            ]),
            &["method", "path"],
        )?;

        let http_errors_total = IntCounterVec::new(
            Opts::new("registrar_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )?;

        let process_executions_total = IntCounterVec::new(
            Opts::new(
                "registrar_process_executions_total",
                "Process executions by outcome",
            ),
            &["process", "outcome"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_errors_total.clone()))?;
        registry.register(Box::new(process_executions_total.clone()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                process_executions_total,
            }),
        })
    }

    /// Total request count across all labels.
    pub fn requests(&self) -> u64 {
        sum_counters(&self.inner.http_requests_total)
    }

    /// Total 4xx/5xx count across all labels.
    pub fn errors(&self) -> u64 {
        sum_counters(&self.inner.http_errors_total)
    }

    /// Executions of `process` that ended with `outcome`.
    pub fn executions(&self, process: &str, outcome: &str) -> u64 {
        self.inner
            .process_executions_total
            .get_metric_with_label_values(&[process, outcome])
            .map(|c| c.get())
            .unwrap_or(0)
    }

    /// Count one process execution.
    pub fn record_execution(&self, process: &str, outcome: &str) {
        self.inner
            .process_executions_total
            .with_label_values(&[process, outcome])
            .inc();
    }

    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Gather all metrics and encode them in Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer).map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

fn sum_counters(vec: &IntCounterVec) -> u64 {
    vec.collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

/// Middleware that records HTTP request metrics.
///
/// The `path` label is the matched route template (`/processes/{id}`), so
/// arbitrary process ids in URLs do not create new series.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        m.record_request(&method, &path, response.status().as_u16(), duration);
    }

    response
}
