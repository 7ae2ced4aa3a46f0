//! Booking business logic service
//!
//! Owns the check-then-book flow: every create/update validates the
//! request, loads the table's active snapshot and asks the availability
//! engine for a verdict before touching storage. The check and the write
//! run under a per-table lock so two concurrent requests for overlapping
//! slots cannot both pass the check.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::{BookingConfig, CancellationPolicy};
use crate::domain::availability::{self, TimeSlot};
use crate::domain::{Booking, BookingStatus, DomainError, DomainResult, RepositoryProvider};

/// Input for creating or replacing a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub table_location_id: i32,
    pub starts_at: DateTime<Utc>,
    /// Falls back to the configured default when absent
    pub duration_hours: Option<i64>,
    pub party_size: i32,
    pub special_request: Option<String>,
}

/// Aggregated booking counters, fixed shape
#[derive(Debug, Clone, PartialEq)]
pub struct BookingStatistics {
    pub total: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub no_show: u64,
    pub today: u64,
    pub this_week: u64,
    pub this_month: u64,
    pub average_party_size: f64,
    /// Up to five most-booked tables, busiest first
    pub popular_tables: Vec<TablePopularity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePopularity {
    pub table_location_id: i32,
    pub bookings: u64,
}

/// Service for booking lifecycle operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    config: BookingConfig,
    /// Serializes check-then-insert per table
    table_locks: DashMap<i32, Arc<Mutex<()>>>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, config: BookingConfig) -> Self {
        Self {
            repos,
            config,
            table_locks: DashMap::new(),
        }
    }

    fn table_lock(&self, table_location_id: i32) -> Arc<Mutex<()>> {
        self.table_locks
            .entry(table_location_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn resolve_duration(&self, duration_hours: Option<i64>) -> i64 {
        duration_hours.unwrap_or(self.config.default_duration_hours)
    }

    fn validate_request(&self, req: &NewBooking) -> DomainResult<()> {
        if req.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer_name must not be empty"));
        }
        if req.party_size < 1 || req.party_size > self.config.max_party_size {
            return Err(DomainError::validation(format!(
                "party_size must be between 1 and {}",
                self.config.max_party_size
            )));
        }
        if req.starts_at <= Utc::now() {
            return Err(DomainError::validation("starts_at must be in the future"));
        }
        Ok(())
    }

    /// Occupied slots of a table, optionally ignoring one booking id
    /// (used when that booking itself is being moved).
    async fn occupied_slots(
        &self,
        table_location_id: i32,
        exclude_booking: Option<i32>,
    ) -> DomainResult<Vec<TimeSlot>> {
        let active = self
            .repos
            .bookings()
            .find_active_for_table(table_location_id)
            .await?;
        Ok(active
            .iter()
            .filter(|b| Some(b.id) != exclude_booking)
            .map(Booking::slot)
            .collect())
    }

    pub async fn create(&self, req: NewBooking) -> DomainResult<Booking> {
        self.validate_request(&req)?;
        let duration = self.resolve_duration(req.duration_hours);

        let table_id = req.table_location_id;
        self.repos
            .tables()
            .find_by_id(table_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "TableLocation",
                field: "id",
                value: table_id.to_string(),
            })?;

        let lock = self.table_lock(table_id);
        let _guard = lock.lock().await;

        let occupied = self.occupied_slots(table_id, None).await?;
        if !availability::is_available(Utc::now(), req.starts_at, duration, &occupied)? {
            metrics::counter!("booking_conflicts_total").increment(1);
            return Err(DomainError::conflict(format!(
                "table location {} is already booked around {}",
                table_id, req.starts_at
            )));
        }

        let id = self.repos.bookings().next_id().await;
        let booking = Booking::new(
            id,
            req.customer_name.trim(),
            req.customer_email,
            req.customer_phone,
            table_id,
            req.starts_at,
            duration,
            req.party_size,
            req.special_request,
        );
        self.repos.bookings().save(booking.clone()).await?;

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_id = id,
            table_location_id = table_id,
            starts_at = %req.starts_at,
            duration_hours = duration,
            "Booking created"
        );

        Ok(booking)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Booking> {
        if id < 1 {
            return Err(DomainError::validation("booking id must be positive"));
        }
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn list(&self) -> DomainResult<Vec<Booking>> {
        let mut bookings = self.repos.bookings().find_all().await?;
        sort_by_start(&mut bookings);
        Ok(bookings)
    }

    /// Full-field replace. Keeps the original status and creation time,
    /// and re-checks availability against a snapshot that excludes the
    /// booking being moved.
    pub async fn update(&self, id: i32, req: NewBooking) -> DomainResult<Booking> {
        let existing = self.get(id).await?;
        self.validate_request(&req)?;
        let duration = self.resolve_duration(req.duration_hours);

        let table_id = req.table_location_id;
        self.repos
            .tables()
            .find_by_id(table_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "TableLocation",
                field: "id",
                value: table_id.to_string(),
            })?;

        let lock = self.table_lock(table_id);
        let _guard = lock.lock().await;

        let occupied = self.occupied_slots(table_id, Some(id)).await?;
        if !availability::is_available(Utc::now(), req.starts_at, duration, &occupied)? {
            metrics::counter!("booking_conflicts_total").increment(1);
            return Err(DomainError::conflict(format!(
                "table location {} is already booked around {}",
                table_id, req.starts_at
            )));
        }

        let updated = Booking {
            id,
            customer_name: req.customer_name.trim().to_string(),
            customer_email: req.customer_email,
            customer_phone: req.customer_phone,
            table_location_id: table_id,
            starts_at: req.starts_at,
            duration_hours: duration,
            party_size: req.party_size,
            special_request: req.special_request,
            status: existing.status,
            created_at: existing.created_at,
        };
        self.repos.bookings().update(updated.clone()).await?;

        info!(booking_id = id, table_location_id = table_id, "Booking updated");
        Ok(updated)
    }

    pub async fn update_status(&self, id: i32, status: BookingStatus) -> DomainResult<Booking> {
        let mut booking = self.get(id).await?;
        booking.status = status;
        self.repos.bookings().update(booking.clone()).await?;

        info!(booking_id = id, status = %status, "Booking status updated");
        Ok(booking)
    }

    /// Cancel according to the configured policy: soft-cancel keeps the
    /// row with status Cancelled, hard-delete removes it.
    pub async fn cancel(&self, id: i32) -> DomainResult<()> {
        let mut booking = self.get(id).await?;

        match self.config.cancellation_policy {
            CancellationPolicy::SoftCancel => {
                booking.cancel();
                self.repos.bookings().update(booking).await?;
            }
            CancellationPolicy::HardDelete => {
                self.repos.bookings().delete(id).await?;
            }
        }

        metrics::counter!("bookings_cancelled_total").increment(1);
        info!(
            booking_id = id,
            policy = ?self.config.cancellation_policy,
            "Booking cancelled"
        );
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if id < 1 {
            return Err(DomainError::validation("booking id must be positive"));
        }
        self.repos.bookings().delete(id).await?;
        info!(booking_id = id, "Booking deleted");
        Ok(())
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        let mut bookings = self.repos.bookings().find_by_date(date).await?;
        sort_by_start(&mut bookings);
        Ok(bookings)
    }

    pub async fn list_by_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        if from > to {
            return Err(DomainError::validation("from must not be after to"));
        }
        let mut bookings = self.repos.bookings().find_by_range(from, to).await?;
        sort_by_start(&mut bookings);
        Ok(bookings)
    }

    pub async fn list_by_status(&self, status: BookingStatus) -> DomainResult<Vec<Booking>> {
        let mut bookings = self.repos.bookings().find_by_status(status).await?;
        sort_by_start(&mut bookings);
        Ok(bookings)
    }

    /// Availability of one table for a requested slot.
    ///
    /// An unknown table is reported as unavailable, not as an error;
    /// a non-positive id or duration is still a validation error.
    pub async fn is_table_available(
        &self,
        table_location_id: i32,
        starts_at: DateTime<Utc>,
        duration_hours: Option<i64>,
    ) -> DomainResult<bool> {
        if table_location_id < 1 {
            return Err(DomainError::validation(
                "table_location_id must be positive",
            ));
        }
        let duration = self.resolve_duration(duration_hours);

        if self
            .repos
            .tables()
            .find_by_id(table_location_id)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        let occupied = self.occupied_slots(table_location_id, None).await?;
        availability::is_available(Utc::now(), starts_at, duration, &occupied)
    }

    /// Aggregate counters over every stored booking. `now` anchors the
    /// today/this-week/this-month windows (UTC, ISO weeks).
    pub async fn statistics(&self, now: DateTime<Utc>) -> DomainResult<BookingStatistics> {
        let bookings = self.repos.bookings().find_all().await?;

        let mut stats = BookingStatistics {
            total: bookings.len() as u64,
            confirmed: 0,
            completed: 0,
            cancelled: 0,
            no_show: 0,
            today: 0,
            this_week: 0,
            this_month: 0,
            average_party_size: 0.0,
            popular_tables: Vec::new(),
        };

        let mut per_table: HashMap<i32, u64> = HashMap::new();
        let mut guests_total: i64 = 0;

        for booking in &bookings {
            match booking.status {
                BookingStatus::Confirmed => stats.confirmed += 1,
                BookingStatus::Completed => stats.completed += 1,
                BookingStatus::Cancelled => stats.cancelled += 1,
                BookingStatus::NoShow => stats.no_show += 1,
            }

            if booking.starts_at.date_naive() == now.date_naive() {
                stats.today += 1;
            }
            if booking.starts_at.iso_week() == now.iso_week() {
                stats.this_week += 1;
            }
            if booking.starts_at.year() == now.year() && booking.starts_at.month() == now.month() {
                stats.this_month += 1;
            }

            guests_total += booking.party_size as i64;
            *per_table.entry(booking.table_location_id).or_default() += 1;
        }

        if !bookings.is_empty() {
            stats.average_party_size = guests_total as f64 / bookings.len() as f64;
        }

        let mut popular: Vec<TablePopularity> = per_table
            .into_iter()
            .map(|(table_location_id, bookings)| TablePopularity {
                table_location_id,
                bookings,
            })
            .collect();
        popular.sort_by(|a, b| {
            b.bookings
                .cmp(&a.bookings)
                .then(a.table_location_id.cmp(&b.table_location_id))
        });
        popular.truncate(5);
        stats.popular_tables = popular;

        Ok(stats)
    }
}

fn sort_by_start(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)));
}

// ── Tests ──────────────────────────────────────────────────────
