//! Booking REST API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use super::dto::{
    BookingListParams, BookingResponse, BookingStatisticsResponse, CreateBookingRequest,
    UpdateBookingRequest, UpdateBookingStatusRequest,
};
use crate::application::BookingService;
use crate::domain::{BookingStatus, DomainError};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<BookingService>,
}

fn parse_status(s: &str) -> Result<BookingStatus, DomainError> {
    BookingStatus::parse(s).ok_or_else(|| {
        let valid: Vec<&str> = BookingStatus::ALL.iter().map(|v| v.as_str()).collect();
        DomainError::validation(format!(
            "unknown status '{}', expected one of: {}",
            s,
            valid.join(", ")
        ))
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(BookingListParams),
    responses(
        (status = 200, description = "Booking list, ordered by start time", body = ApiResponse<Vec<BookingResponse>>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    Query(params): Query<BookingListParams>,
) -> Result<Json<ApiResponse<Vec<BookingResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let result = if let Some(date) = params.date {
        state.bookings.list_by_date(date).await
    } else if params.from.is_some() || params.to.is_some() {
        match (params.from, params.to) {
            (Some(from), Some(to)) => state.bookings.list_by_range(from, to).await,
            _ => Err(DomainError::validation(
                "from and to must be supplied together",
            )),
        }
    } else if let Some(status) = params.status.as_deref() {
        match parse_status(status) {
            Ok(status) => state.bookings.list_by_status(status).await,
            Err(e) => Err(e),
        }
    } else {
        state.bookings.list().await
    };

    let bookings = result.map_err(domain_error_response)?;
    let responses: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingResponse>),
        (status = 404, description = "Table location not found"),
        (status = 409, description = "Slot already taken"),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let booking = state
        .bookings
        .create(req.into())
        .await
        .map_err(domain_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(booking.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let booking = state
        .bookings
        .get(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "New slot already taken"),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn update_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let booking = state
        .bookings
        .update(id, req.into())
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}/status",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_booking_status(
    State(state): State<BookingAppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = parse_status(&req.status).map_err(domain_error_response)?;
    let booking = state
        .bookings
        .update_status(id, status)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .bookings
        .cancel(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success("Booking cancelled".to_string())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .bookings
        .delete(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success("Booking deleted".to_string())))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/stats",
    tag = "Bookings",
    responses(
        (status = 200, description = "Aggregate booking statistics", body = ApiResponse<BookingStatisticsResponse>)
    )
)]
pub async fn booking_statistics(
    State(state): State<BookingAppState>,
) -> Result<Json<ApiResponse<BookingStatisticsResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let stats = state
        .bookings
        .statistics(Utc::now())
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(stats.into())))
}
