//! Table location DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::NewTableLocation;
use crate::domain::TableLocation;

/// A table location as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TableLocationResponse {
    pub id: i32,
    pub name: String,
    /// Seat count; `null` when the location has no tracked capacity
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TableLocation> for TableLocationResponse {
    fn from(t: TableLocation) -> Self {
        Self {
            id: t.id,
            name: t.name,
            capacity: t.capacity,
            image_url: t.image_url,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTableLocationRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: Option<i32>,
    #[validate(length(max = 500, message = "image_url is too long"))]
    pub image_url: Option<String>,
}

impl From<CreateTableLocationRequest> for NewTableLocation {
    fn from(req: CreateTableLocationRequest) -> Self {
        Self {
            name: req.name,
            capacity: req.capacity,
            image_url: req.image_url,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTableLocationRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: Option<i32>,
    #[validate(length(max = 500, message = "image_url is too long"))]
    pub image_url: Option<String>,
}

impl From<UpdateTableLocationRequest> for NewTableLocation {
    fn from(req: UpdateTableLocationRequest) -> Self {
        Self {
            name: req.name,
            capacity: req.capacity,
            image_url: req.image_url,
        }
    }
}

/// Query for listing tables free at a given slot
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailableTablesParams {
    /// Requested start of the visit (ISO 8601)
    pub starts_at: DateTime<Utc>,
    /// Number of guests to seat
    pub party_size: i32,
    /// Visit length in hours; the configured default applies when omitted
    pub duration_hours: Option<i64>,
}

/// Query for checking a single table's availability
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityParams {
    /// Requested start of the visit (ISO 8601)
    pub starts_at: DateTime<Utc>,
    /// Visit length in hours; the configured default applies when omitted
    pub duration_hours: Option<i64>,
}

/// Verdict for a single table and slot
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub table_location_id: i32,
    pub starts_at: DateTime<Utc>,
    pub available: bool,
}
