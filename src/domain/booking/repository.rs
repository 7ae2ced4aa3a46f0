//! Booking repository interface

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::model::{Booking, BookingStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking
    async fn save(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// Update an existing booking
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Delete a booking by ID
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Find all bookings (any status)
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Find availability-blocking (non-cancelled) bookings for a table
    async fn find_active_for_table(&self, table_location_id: i32) -> DomainResult<Vec<Booking>>;

    /// Find bookings starting on the given UTC calendar date
    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Booking>>;

    /// Find bookings starting inside `[from, to]`
    async fn find_by_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>>;

    /// Find bookings with the given status
    async fn find_by_status(&self, status: BookingStatus) -> DomainResult<Vec<Booking>>;

    /// Generate next booking ID
    async fn next_id(&self) -> i32;
}
