//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): handled requests by tier, kind, status
//! - `relay_request_duration_seconds` (histogram): end-to-end latency by tier, kind
//! - `relay_downstream_failures_total` (counter): failed forwards by tier, kind, reason

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::TierRole;
use crate::store::RecordKind;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(tier: TierRole, kind: RecordKind, status: u16, start: Instant) {
    metrics::counter!(
        "relay_requests_total",
        "tier" => tier.as_str(),
        "kind" => kind.as_str(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "relay_request_duration_seconds",
        "tier" => tier.as_str(),
        "kind" => kind.as_str()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_downstream_failure(tier: TierRole, kind: RecordKind, reason: &'static str) {
    metrics::counter!(
        "relay_downstream_failures_total",
        "tier" => tier.as_str(),
        "kind" => kind.as_str(),
        "reason" => reason
    )
    .increment(1);
}
