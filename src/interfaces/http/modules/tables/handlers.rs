//! Table location REST API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{
    AvailabilityParams, AvailabilityResponse, AvailableTablesParams, CreateTableLocationRequest,
    TableLocationResponse, UpdateTableLocationRequest,
};
use crate::application::{BookingService, TableLocationService};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};

/// Application state for table location handlers.
///
/// Carries the booking service too: the per-table availability check
/// shares its engine invocation with the booking flow.
#[derive(Clone)]
pub struct TableAppState {
    pub tables: Arc<TableLocationService>,
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/tables",
    tag = "Table Locations",
    responses(
        (status = 200, description = "All table locations, sorted by name", body = ApiResponse<Vec<TableLocationResponse>>)
    )
)]
pub async fn list_table_locations(
    State(state): State<TableAppState>,
) -> Result<Json<ApiResponse<Vec<TableLocationResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let tables = state.tables.list().await.map_err(domain_error_response)?;
    let responses: Vec<TableLocationResponse> = tables.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    post,
    path = "/api/v1/tables",
    tag = "Table Locations",
    request_body = CreateTableLocationRequest,
    responses(
        (status = 201, description = "Table location created", body = ApiResponse<TableLocationResponse>),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn create_table_location(
    State(state): State<TableAppState>,
    ValidatedJson(req): ValidatedJson<CreateTableLocationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<TableLocationResponse>>),
    (StatusCode, Json<ApiResponse<()>>),
> {
    let table = state
        .tables
        .create(req.into())
        .await
        .map_err(domain_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(table.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/tables/{id}",
    tag = "Table Locations",
    params(("id" = i32, Path, description = "Table location ID")),
    responses(
        (status = 200, description = "Table location details", body = ApiResponse<TableLocationResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_table_location(
    State(state): State<TableAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TableLocationResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let table = state.tables.get(id).await.map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(table.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/tables/{id}",
    tag = "Table Locations",
    params(("id" = i32, Path, description = "Table location ID")),
    request_body = UpdateTableLocationRequest,
    responses(
        (status = 200, description = "Table location updated", body = ApiResponse<TableLocationResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn update_table_location(
    State(state): State<TableAppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateTableLocationRequest>,
) -> Result<Json<ApiResponse<TableLocationResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let table = state
        .tables
        .update(id, req.into())
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(table.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tables/{id}",
    tag = "Table Locations",
    params(("id" = i32, Path, description = "Table location ID")),
    responses(
        (status = 200, description = "Table location deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Upcoming bookings exist")
    )
)]
pub async fn delete_table_location(
    State(state): State<TableAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .tables
        .delete(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        "Table location deleted".to_string(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/tables/available",
    tag = "Table Locations",
    params(AvailableTablesParams),
    responses(
        (status = 200, description = "Tables free for the requested slot", body = ApiResponse<Vec<TableLocationResponse>>),
        (status = 400, description = "Invalid slot")
    )
)]
pub async fn available_tables(
    State(state): State<TableAppState>,
    Query(params): Query<AvailableTablesParams>,
) -> Result<Json<ApiResponse<Vec<TableLocationResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let tables = state
        .tables
        .available_tables(params.starts_at, params.party_size, params.duration_hours)
        .await
        .map_err(domain_error_response)?;

    let responses: Vec<TableLocationResponse> = tables.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tables/{id}/availability",
    tag = "Table Locations",
    params(
        ("id" = i32, Path, description = "Table location ID"),
        AvailabilityParams
    ),
    responses(
        (status = 200, description = "Availability verdict", body = ApiResponse<AvailabilityResponse>),
        (status = 400, description = "Invalid slot")
    )
)]
pub async fn check_availability(
    State(state): State<TableAppState>,
    Path(id): Path<i32>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let available = state
        .bookings
        .is_table_available(id, params.starts_at, params.duration_hours)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(AvailabilityResponse {
        table_location_id: id,
        starts_at: params.starts_at,
        available,
    })))
}
