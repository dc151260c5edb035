//! Prometheus metrics infrastructure
//!
//! This module provides utilities for initializing Prometheus metrics
//! and recording per-route API request metrics.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Initialize the Prometheus metrics exporter
///
/// This starts an HTTP listener on the given host and port that exposes
/// metrics at `/metrics`.
///
/// # Example
///
/// ```ignore
/// observability::metrics::init_metrics("0.0.0.0", 9100)?;
/// // Metrics available at http://localhost:9100/metrics
/// ```
pub fn init_metrics(host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Request metrics for the HTTP API
///
/// Recording is a no-op until a recorder is installed, so handlers and
/// middleware can record unconditionally.
///
/// # Metrics
///
/// * `api_requests_total{service, route, status}` - Requests served
/// * `api_request_duration_seconds{service, route}` - Request latency
#[derive(Debug, Clone)]
pub struct ApiMetrics {
    service_name: String,
}

impl ApiMetrics {
    /// Create metrics labelled with a service name
    pub fn new(service_name: impl Into<String>) -> Self {
        let service_name = service_name.into();
        gauge!("api_up", "service" => service_name.clone()).set(1.0);
        Self { service_name }
    }

    /// Record a completed request
    ///
    /// # Arguments
    ///
    /// * `route` - Matched route template (e.g. `/settings`)
    /// * `duration` - How long the request took
    /// * `status_code` - HTTP status code
    pub fn record_request(&self, route: &str, duration: Duration, status_code: u16) {
        counter!(
            "api_requests_total",
            "service" => self.service_name.clone(),
            "route" => route.to_string(),
            "status" => status_code.to_string()
        )
        .increment(1);

        histogram!(
            "api_request_duration_seconds",
            "service" => self.service_name.clone(),
            "route" => route.to_string()
        )
        .record(duration.as_secs_f64());
    }

    /// Get the service name
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
