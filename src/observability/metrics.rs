//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bang_resolutions_total` (counter): resolutions by `outcome`
//!   (`lone`, `bang`, `fallback`)
//! - `bang_table_compiles_total` (counter): table compilations
//! - `bang_table_entries` (gauge): entries in the live table

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::resolver::Outcome;

/// Install the Prometheus exporter with its own HTTP listener on `addr`.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(outcome: Outcome) {
    metrics::counter!("bang_resolutions_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_compile() {
    metrics::counter!("bang_table_compiles_total").increment(1);
}

pub fn record_table_size(entries: usize) {
    metrics::gauge!("bang_table_entries").set(entries as f64);
}
