//! Prometheus scrape endpoint
//!
//! Renders whatever the recorder installed in `main` has accumulated:
//! request counters and timings from the middleware plus the booking
//! domain counters emitted by the services.

use axum::{extract::State, http::header, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Handle to the installed Prometheus recorder, shared with the router
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics` in the Prometheus text exposition format
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.handle.render(),
    )
}
