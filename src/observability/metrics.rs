//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_upstream_attempts_total` (counter): outbound attempts by resource, outcome
//! - `gateway_upstream_retries_total` (counter): retries by resource, reason
//! - `gateway_upstream_failures_total` (counter): failed forwards by resource, kind
//! - `gateway_admission_total` (counter): gate decisions by outcome
//! - `gateway_request_duration_seconds` (histogram): handler latency by route, status
//!
//! Recording is a no-op until a recorder is installed, so tests need no setup.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with an HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// First path segment of an upstream endpoint, used as a low-cardinality label.
pub fn resource_label(endpoint: &str) -> &str {
    endpoint.split('/').find(|s| !s.is_empty()).unwrap_or("root")
}

pub fn record_upstream_attempt(resource: &str, outcome: &'static str) {
    counter!(
        "gateway_upstream_attempts_total",
        "resource" => resource.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_upstream_retry(resource: &str, reason: &'static str) {
    counter!(
        "gateway_upstream_retries_total",
        "resource" => resource.to_string(),
        "reason" => reason
    )
    .increment(1);
}

pub fn record_upstream_failure(resource: &str, kind: &'static str) {
    counter!(
        "gateway_upstream_failures_total",
        "resource" => resource.to_string(),
        "kind" => kind
    )
    .increment(1);
}

pub fn record_admission(outcome: &'static str) {
    counter!("gateway_admission_total", "outcome" => outcome).increment(1);
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    histogram!(
        "gateway_request_duration_seconds",
        "route" => route,
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
