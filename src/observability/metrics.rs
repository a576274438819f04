//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lanes_resolutions_total` (counter): resolutions by `matched` = true/false
//! - `lanes_events_total` (counter): emitted events by `kind` = leave/update/route
//! - `lanes_duplicates_total` (counter): resolutions equal to the current route
//! - `lanes_config_reloads_total` (counter): route tables swapped at runtime

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(matched: bool) {
    metrics::counter!("lanes_resolutions_total", "matched" => matched.to_string()).increment(1);
}

pub fn record_event(kind: &'static str) {
    metrics::counter!("lanes_events_total", "kind" => kind).increment(1);
}

pub fn record_duplicate() {
    metrics::counter!("lanes_duplicates_total").increment(1);
}

pub fn record_reload() {
    metrics::counter!("lanes_config_reloads_total").increment(1);
}
