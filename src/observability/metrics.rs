//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by outcome and status
//! - `relay_request_duration_seconds` (histogram): handler latency
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus
//! recorder.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished relay request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    counter!("relay_requests_total", "outcome" => outcome, "status" => status.to_string()).increment(1);
    histogram!("relay_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
