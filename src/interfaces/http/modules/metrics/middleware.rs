//! Request metrics for the reservation API
//!
//! Every request through the router is counted and timed against the
//! Prometheus recorder installed at startup. Scrapes of `/metrics` itself
//! are not recorded.

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Counts requests (`http_requests_total`) and times them
/// (`http_request_duration_seconds`), labelled by method, route template
/// and status.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = route_template(&request);

    if route == "/metrics" {
        return next.run(request).await;
    }

    let started = Instant::now();
    let response = next.run(request).await;
    record_request(
        method,
        route,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );

    response
}

/// The matched route template, so `/api/v1/bookings/{id}` stays one series
/// for every booking id. Unmatched paths fall back to the raw URI path.
fn route_template(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned())
}

fn record_request(method: String, route: String, status: u16, seconds: f64) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(seconds);
}
