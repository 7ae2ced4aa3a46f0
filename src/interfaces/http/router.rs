//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, TableLocationService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::metrics::MetricsState;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{bookings, health, metrics, tables};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Bookings
        bookings::list_bookings,
        bookings::create_booking,
        bookings::get_booking,
        bookings::update_booking,
        bookings::delete_booking,
        bookings::update_booking_status,
        bookings::cancel_booking,
        bookings::booking_statistics,
        // Table Locations
        tables::list_table_locations,
        tables::create_table_location,
        tables::get_table_location,
        tables::update_table_location,
        tables::delete_table_location,
        tables::available_tables,
        tables::check_availability,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Bookings
            bookings::dto::BookingResponse,
            bookings::dto::CreateBookingRequest,
            bookings::dto::UpdateBookingRequest,
            bookings::dto::UpdateBookingStatusRequest,
            bookings::dto::BookingStatisticsResponse,
            bookings::dto::TablePopularityDto,
            // Table Locations
            tables::dto::TableLocationResponse,
            tables::dto::CreateTableLocationRequest,
            tables::dto::UpdateTableLocationRequest,
            tables::dto::AvailabilityResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health check endpoints"),
        (name = "Bookings", description = "Booking lifecycle: create, reschedule, status changes, statistics"),
        (name = "Table Locations", description = "Table location management and availability lookups"),
    ),
    info(
        title = "Tablebook Reservation API",
        version = "1.0.0",
        description = "REST API for restaurant table reservations with overlap-free availability checks",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    booking_service: Arc<BookingService>,
    table_service: Arc<TableLocationService>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let booking_state = bookings::BookingAppState {
        bookings: booking_service.clone(),
    };

    let table_state = tables::TableAppState {
        tables: table_service,
        bookings: booking_service,
    };

    let health_state = health::HealthState {
        repos,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = MetricsState {
        handle: metrics_handle,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/stats", get(bookings::booking_statistics))
        .route(
            "/{id}",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .route("/{id}/status", put(bookings::update_booking_status))
        .route("/{id}/cancel", post(bookings::cancel_booking))
        .with_state(booking_state);

    let table_routes = Router::new()
        .route(
            "/",
            get(tables::list_table_locations).post(tables::create_table_location),
        )
        .route("/available", get(tables::available_tables))
        .route(
            "/{id}",
            get(tables::get_table_location)
                .put(tables::update_table_location)
                .delete(tables::delete_table_location),
        )
        .route("/{id}/availability", get(tables::check_availability))
        .with_state(table_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route(
            "/health",
            get(health::health_check).with_state(health_state),
        )
        // Prometheus scrape endpoint
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics_state),
        )
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Table Locations
        .nest("/api/v1/tables", table_routes)
        // Middleware
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BookingConfig;
    use crate::infrastructure::storage::InMemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::Service;

    fn app() -> Router {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        let config = BookingConfig::default();
        let booking_service = Arc::new(BookingService::new(repos.clone(), config.clone()));
        let table_service = Arc::new(TableLocationService::new(repos.clone(), config));
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(repos, booking_service, table_service, handle)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn booking_body(table_location_id: i32, starts_at: chrono::DateTime<Utc>) -> serde_json::Value {
        serde_json::json!({
            "customer_name": "Alice Brown",
            "customer_email": "alice@example.com",
            "customer_phone": "0712345678",
            "table_location_id": table_location_id,
            "starts_at": starts_at.to_rfc3339(),
            "party_size": 2
        })
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let mut svc = app().into_service();
        let resp = svc.call(get_request("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_json(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn metrics_endpoint_renders() {
        let mut svc = app().into_service();
        let resp = svc.call(get_request("/metrics")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_table_then_booking() {
        let mut svc = app().into_service();

        let resp = svc
            .call(json_request(
                "POST",
                "/api/v1/tables",
                serde_json::json!({"name": "Window", "capacity": 4}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let table = read_json(resp).await;
        let table_id = table["data"]["id"].as_i64().unwrap() as i32;

        let starts_at = Utc::now() + Duration::hours(24);
        let resp = svc
            .call(json_request(
                "POST",
                "/api/v1/bookings",
                booking_body(table_id, starts_at),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let booking = read_json(resp).await;
        assert_eq!(booking["success"], true);
        assert_eq!(booking["data"]["status"], "Confirmed");
        assert_eq!(booking["data"]["duration_hours"], 2);
    }

    #[tokio::test]
    async fn overlapping_booking_returns_409() {
        let mut svc = app().into_service();

        svc.call(json_request(
            "POST",
            "/api/v1/tables",
            serde_json::json!({"name": "Terrace"}),
        ))
        .await
        .unwrap();

        let starts_at = Utc::now() + Duration::hours(24);
        let resp = svc
            .call(json_request(
                "POST",
                "/api/v1/bookings",
                booking_body(1, starts_at),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = svc
            .call(json_request(
                "POST",
                "/api/v1/bookings",
                booking_body(1, starts_at + Duration::hours(1)),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = read_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn booking_for_unknown_table_returns_404() {
        let mut svc = app().into_service();

        let starts_at = Utc::now() + Duration::hours(24);
        let resp = svc
            .call(json_request(
                "POST",
                "/api/v1/bookings",
                booking_body(42, starts_at),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_booking_body_returns_422() {
        let mut svc = app().into_service();

        let starts_at = Utc::now() + Duration::hours(24);
        let mut body = booking_body(1, starts_at);
        body["party_size"] = serde_json::json!(0);
        body["customer_email"] = serde_json::json!("not-an-email");

        let resp = svc
            .call(json_request("POST", "/api/v1/bookings", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn oversized_duration_in_body_returns_422() {
        let mut svc = app().into_service();

        svc.call(json_request(
            "POST",
            "/api/v1/tables",
            serde_json::json!({"name": "Window", "capacity": 4}),
        ))
        .await
        .unwrap();

        let starts_at = Utc::now() + Duration::hours(24);
        let mut body = booking_body(1, starts_at);
        body["duration_hours"] = serde_json::json!(10_000_000_000i64);

        let resp = svc
            .call(json_request("POST", "/api/v1/bookings", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = read_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn oversized_duration_in_query_returns_400() {
        let mut svc = app().into_service();

        svc.call(json_request(
            "POST",
            "/api/v1/tables",
            serde_json::json!({"name": "Window", "capacity": 4}),
        ))
        .await
        .unwrap();

        let starts_at = Utc::now() + Duration::hours(24);
        let uri = format!(
            "/api/v1/tables/1/availability?starts_at={}&duration_hours=10000000000",
            starts_at.format("%Y-%m-%dT%H:%M:%SZ")
        );
        let resp = svc.call(get_request(&uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let free_uri = format!(
            "/api/v1/tables/available?starts_at={}&party_size=2&duration_hours=10000000000",
            starts_at.format("%Y-%m-%dT%H:%M:%SZ")
        );
        let resp = svc.call(get_request(&free_uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn availability_endpoint_reports_taken_slot() {
        let mut svc = app().into_service();

        svc.call(json_request(
            "POST",
            "/api/v1/tables",
            serde_json::json!({"name": "Main Hall"}),
        ))
        .await
        .unwrap();

        let starts_at = Utc::now() + Duration::hours(24);
        svc.call(json_request(
            "POST",
            "/api/v1/bookings",
            booking_body(1, starts_at),
        ))
        .await
        .unwrap();

        let uri = format!(
            "/api/v1/tables/1/availability?starts_at={}",
            starts_at.format("%Y-%m-%dT%H:%M:%SZ")
        );
        let resp = svc.call(get_request(&uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_json(resp).await;
        assert_eq!(body["data"]["available"], false);

        let free_uri = format!(
            "/api/v1/tables/1/availability?starts_at={}",
            (starts_at + Duration::hours(6)).format("%Y-%m-%dT%H:%M:%SZ")
        );
        let resp = svc.call(get_request(&free_uri)).await.unwrap();
        let body = read_json(resp).await;
        assert_eq!(body["data"]["available"], true);
    }

    #[tokio::test]
    async fn available_tables_excludes_booked_and_small() {
        let mut svc = app().into_service();

        svc.call(json_request(
            "POST",
            "/api/v1/tables",
            serde_json::json!({"name": "Window", "capacity": 2}),
        ))
        .await
        .unwrap();
        svc.call(json_request(
            "POST",
            "/api/v1/tables",
            serde_json::json!({"name": "Main Hall", "capacity": 6}),
        ))
        .await
        .unwrap();
        svc.call(json_request(
            "POST",
            "/api/v1/tables",
            serde_json::json!({"name": "Terrace", "capacity": 4}),
        ))
        .await
        .unwrap();

        // occupy the Terrace (id 3) around the requested slot
        let starts_at = Utc::now() + Duration::hours(24);
        let resp = svc
            .call(json_request(
                "POST",
                "/api/v1/bookings",
                booking_body(3, starts_at),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let uri = format!(
            "/api/v1/tables/available?starts_at={}&party_size=4",
            starts_at.format("%Y-%m-%dT%H:%M:%SZ")
        );
        let resp = svc.call(get_request(&uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // Window is too small, Terrace is occupied
        let body = read_json(resp).await;
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Main Hall"]);
    }

    #[tokio::test]
    async fn unknown_booking_returns_404() {
        let mut svc = app().into_service();
        let resp = svc.call(get_request("/api/v1/bookings/999")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cancel_frees_the_slot() {
        let mut svc = app().into_service();

        svc.call(json_request(
            "POST",
            "/api/v1/tables",
            serde_json::json!({"name": "Bar"}),
        ))
        .await
        .unwrap();

        let starts_at = Utc::now() + Duration::hours(24);
        let resp = svc
            .call(json_request(
                "POST",
                "/api/v1/bookings",
                booking_body(1, starts_at),
            ))
            .await
            .unwrap();
        let booking = read_json(resp).await;
        let id = booking["data"]["id"].as_i64().unwrap();

        let cancel = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/bookings/{}/cancel", id))
            .body(Body::empty())
            .unwrap();
        let resp = svc.call(cancel).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = svc
            .call(json_request(
                "POST",
                "/api/v1/bookings",
                booking_body(1, starts_at),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn status_filter_rejects_unknown_value() {
        let mut svc = app().into_service();
        let resp = svc
            .call(get_request("/api/v1/bookings?status=Pending"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let mut svc = app().into_service();
        let resp = svc.call(get_request("/api-doc/openapi.json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
