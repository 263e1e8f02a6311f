use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Counter names used by the request handlers. The handlers emit these
/// unconditionally; without an installed recorder they are no-ops, so the
/// library stays usable from tests without Prometheus.
pub const REQUESTS_TOTAL: &str = "analyze_requests_total";
pub const REJECTED_TOTAL: &str = "analyze_rejected_total";
pub const FAILED_TOTAL: &str = "analyze_failed_total";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize Prometheus recorder and expose a static gauge with the
    /// active validation toggle. Call once, from the binary.
    pub fn init(validation_enabled: bool) -> Self {
        // Use default buckets to avoid API differences across crate versions.
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        gauge!("analyzer_validation_enabled").set(if validation_enabled { 1.0 } else { 0.0 });

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
