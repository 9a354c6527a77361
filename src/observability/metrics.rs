//! Metrics collection and exposition.
//!
//! # Metrics
//! - `traffic_rule_alterations_total` (counter): alterations by outcome
//!   (`committed`, `missing_strategy`, `invalid_algorithm`)
//! - `traffic_rule_persist_failures_total` (counter): failed durable writes
//! - `traffic_rule_version` (gauge): version of the active snapshot
//! - `traffic_rule_strategies` (gauge): strategies in the active snapshot

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Needs a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_alteration(outcome: &'static str) {
    metrics::counter!("traffic_rule_alterations_total", "outcome" => outcome).increment(1);
}

pub fn record_persist_failure() {
    metrics::counter!("traffic_rule_persist_failures_total").increment(1);
}

pub fn record_snapshot(version: u64, strategies: usize) {
    metrics::gauge!("traffic_rule_version").set(version as f64);
    metrics::gauge!("traffic_rule_strategies").set(strategies as f64);
}
