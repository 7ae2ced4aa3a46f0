//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{BookingStatistics, NewBooking, TablePopularity};
use crate::domain::Booking;

/// A booking as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub table_location_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub duration_hours: i64,
    pub party_size: i32,
    pub special_request: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            ends_at: b.ends_at(),
            customer_name: b.customer_name,
            customer_email: b.customer_email,
            customer_phone: b.customer_phone,
            table_location_id: b.table_location_id,
            starts_at: b.starts_at,
            duration_hours: b.duration_hours,
            party_size: b.party_size,
            special_request: b.special_request,
            status: b.status.as_str().to_string(),
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 50, message = "customer name is required"))]
    pub customer_name: String,
    #[validate(email(message = "customer email must be a valid address"))]
    pub customer_email: String,
    #[validate(length(min = 1, max = 10, message = "customer phone is required"))]
    pub customer_phone: String,
    #[validate(range(min = 1, message = "table_location_id must be positive"))]
    pub table_location_id: i32,
    pub starts_at: DateTime<Utc>,
    /// Booking length in hours; the configured default applies when omitted
    #[validate(range(min = 1, max = 24, message = "duration_hours must be between 1 and 24"))]
    pub duration_hours: Option<i64>,
    #[validate(range(min = 1, max = 20, message = "party_size must be between 1 and 20"))]
    pub party_size: i32,
    #[validate(length(max = 500, message = "special request is too long"))]
    pub special_request: Option<String>,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            customer_name: req.customer_name,
            customer_email: req.customer_email,
            customer_phone: req.customer_phone,
            table_location_id: req.table_location_id,
            starts_at: req.starts_at,
            duration_hours: req.duration_hours,
            party_size: req.party_size,
            special_request: req.special_request,
        }
    }
}

/// Full replacement of a booking's details; status and creation time are kept
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    #[validate(length(min = 1, max = 50, message = "customer name is required"))]
    pub customer_name: String,
    #[validate(email(message = "customer email must be a valid address"))]
    pub customer_email: String,
    #[validate(length(min = 1, max = 10, message = "customer phone is required"))]
    pub customer_phone: String,
    #[validate(range(min = 1, message = "table_location_id must be positive"))]
    pub table_location_id: i32,
    pub starts_at: DateTime<Utc>,
    #[validate(range(min = 1, max = 24, message = "duration_hours must be between 1 and 24"))]
    pub duration_hours: Option<i64>,
    #[validate(range(min = 1, max = 20, message = "party_size must be between 1 and 20"))]
    pub party_size: i32,
    #[validate(length(max = 500, message = "special request is too long"))]
    pub special_request: Option<String>,
}

impl From<UpdateBookingRequest> for NewBooking {
    fn from(req: UpdateBookingRequest) -> Self {
        Self {
            customer_name: req.customer_name,
            customer_email: req.customer_email,
            customer_phone: req.customer_phone,
            table_location_id: req.table_location_id,
            starts_at: req.starts_at,
            duration_hours: req.duration_hours,
            party_size: req.party_size,
            special_request: req.special_request,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingStatusRequest {
    /// One of: `Confirmed`, `Completed`, `Cancelled`, `No-Show`
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

/// Filters for the booking list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookingListParams {
    /// Return bookings starting on this calendar day (UTC, `YYYY-MM-DD`)
    pub date: Option<NaiveDate>,
    /// Start of an inclusive time range (ISO 8601); requires `to`
    pub from: Option<DateTime<Utc>>,
    /// End of an inclusive time range (ISO 8601); requires `from`
    pub to: Option<DateTime<Utc>>,
    /// Filter by status: `Confirmed`, `Completed`, `Cancelled` or `No-Show`
    pub status: Option<String>,
}

/// Popularity entry in the statistics report
#[derive(Debug, Serialize, ToSchema)]
pub struct TablePopularityDto {
    pub table_location_id: i32,
    pub bookings: u64,
}

/// Aggregate booking statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingStatisticsResponse {
    pub total: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub no_show: u64,
    pub today: u64,
    pub this_week: u64,
    pub this_month: u64,
    pub average_party_size: f64,
    pub popular_tables: Vec<TablePopularityDto>,
}

impl From<BookingStatistics> for BookingStatisticsResponse {
    fn from(s: BookingStatistics) -> Self {
        Self {
            total: s.total,
            confirmed: s.confirmed,
            completed: s.completed,
            cancelled: s.cancelled,
            no_show: s.no_show,
            today: s.today,
            this_week: s.this_week,
            this_month: s.this_month,
            average_party_size: s.average_party_size,
            popular_tables: s
                .popular_tables
                .into_iter()
                .map(|TablePopularity { table_location_id, bookings }| TablePopularityDto {
                    table_location_id,
                    bookings,
                })
                .collect(),
        }
    }
}
