//! Prometheus request metrics exposed on `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Build the metrics middleware.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the Prometheus registry rejects the
/// default collectors.
pub(crate) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("events")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}
