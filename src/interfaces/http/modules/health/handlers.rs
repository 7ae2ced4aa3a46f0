//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RepositoryProvider;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: ComponentHealth,
    pub table_locations: u64,
    pub bookings: u64,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is degraded", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    // Probe the store by listing both aggregates
    let probe_start = Instant::now();
    let tables = state.repos.tables().find_all().await;
    let bookings = state.repos.bookings().find_all().await;

    let (storage, table_count, booking_count) = match (tables, bookings) {
        (Ok(tables), Ok(bookings)) => (
            ComponentHealth {
                status: "ok".to_string(),
                latency_ms: Some(probe_start.elapsed().as_millis() as u64),
            },
            tables.len() as u64,
            bookings.len() as u64,
        ),
        _ => (
            ComponentHealth {
                status: "error".to_string(),
                latency_ms: None,
            },
            0,
            0,
        ),
    };

    let overall_status = if storage.status == "ok" {
        "ok"
    } else {
        "degraded"
    };

    let http_status = if overall_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            storage,
            table_locations: table_count,
            bookings: booking_count,
        }),
    )
}
