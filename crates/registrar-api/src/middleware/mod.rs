//! HTTP middleware: request counters and request tracing.

pub mod metrics;
pub mod tracing_layer;
