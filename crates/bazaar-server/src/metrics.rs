//! Metrics collection and export for Bazaar.
//!
//! Uses the `metrics` crate for instrumentation and exports
//! to Prometheus format.

use bazaar_core::RouterStats;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

/// Metric names.
pub mod names {
    pub const CONNECTIONS_TOTAL: &str = "bazaar_connections_total";
    pub const CONNECTIONS_ACTIVE: &str = "bazaar_connections_active";
    pub const EVENTS_TOTAL: &str = "bazaar_events_total";
    pub const DELIVERIES_TOTAL: &str = "bazaar_deliveries_total";
    pub const CUSTOMERS_ONLINE: &str = "bazaar_customers_online";
    pub const SELLERS_ONLINE: &str = "bazaar_sellers_online";
    pub const ADMIN_ONLINE: &str = "bazaar_admin_online";
    pub const LATENCY_SECONDS: &str = "bazaar_event_latency_seconds";
    pub const ERRORS_TOTAL: &str = "bazaar_errors_total";
}

/// Initialize the metrics system.
pub fn init_metrics() {
    metrics::describe_counter!(
        names::CONNECTIONS_TOTAL,
        "Total number of connections since server start"
    );
    metrics::describe_gauge!(
        names::CONNECTIONS_ACTIVE,
        "Current number of active connections"
    );
    metrics::describe_counter!(names::EVENTS_TOTAL, "Inbound events processed, by name");
    metrics::describe_counter!(
        names::DELIVERIES_TOTAL,
        "Outbound events queued to connections"
    );
    metrics::describe_gauge!(names::CUSTOMERS_ONLINE, "Registered customers");
    metrics::describe_gauge!(names::SELLERS_ONLINE, "Registered sellers");
    metrics::describe_gauge!(names::ADMIN_ONLINE, "1 while an admin is connected");
    metrics::describe_histogram!(
        names::LATENCY_SECONDS,
        "Inbound event processing latency in seconds"
    );
    metrics::describe_counter!(names::ERRORS_TOTAL, "Total number of errors");

    info!("Metrics initialized");
}

/// Start the Prometheus metrics server.
///
/// # Errors
///
/// Returns an error if the server cannot be started.
pub fn start_metrics_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    info!("Metrics server listening on {}", addr);
    Ok(())
}

/// Record a new connection.
pub fn record_connection() {
    counter!(names::CONNECTIONS_TOTAL).increment(1);
    gauge!(names::CONNECTIONS_ACTIVE).increment(1.0);
}

/// Record a disconnection.
pub fn record_disconnection() {
    gauge!(names::CONNECTIONS_ACTIVE).decrement(1.0);
}

/// Record an inbound event and the deliveries it produced.
pub fn record_event(name: &'static str, deliveries: usize) {
    counter!(names::EVENTS_TOTAL, "event" => name).increment(1);
    counter!(names::DELIVERIES_TOTAL).increment(deliveries as u64);
}

/// Record event processing latency.
pub fn record_latency(seconds: f64) {
    histogram!(names::LATENCY_SECONDS).record(seconds);
}

/// Update roster gauges.
pub fn set_rosters(stats: &RouterStats) {
    gauge!(names::CUSTOMERS_ONLINE).set(stats.customers as f64);
    gauge!(names::SELLERS_ONLINE).set(stats.sellers as f64);
    gauge!(names::ADMIN_ONLINE).set(if stats.admin_online { 1.0 } else { 0.0 });
}

/// Record an error.
pub fn record_error(error_type: &'static str) {
    counter!(names::ERRORS_TOTAL, "type" => error_type).increment(1);
}

/// Metrics guard that records disconnection on drop.
pub struct ConnectionMetricsGuard;

impl ConnectionMetricsGuard {
    /// Create a new metrics guard, recording a connection.
    #[must_use]
    pub fn new() -> Self {
        record_connection();
        Self
    }
}

impl Default for ConnectionMetricsGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ConnectionMetricsGuard {
    fn drop(&mut self) {
        record_disconnection();
    }
}
