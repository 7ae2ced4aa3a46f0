//! Table location business logic service

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::BookingConfig;
use crate::domain::availability::{self, TimeSlot};
use crate::domain::{Booking, DomainError, DomainResult, RepositoryProvider, TableLocation};

/// Input for creating or replacing a table location
#[derive(Debug, Clone)]
pub struct NewTableLocation {
    pub name: String,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
}

/// Service for table location management and availability lookups
pub struct TableLocationService {
    repos: Arc<dyn RepositoryProvider>,
    config: BookingConfig,
}

impl TableLocationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, config: BookingConfig) -> Self {
        Self { repos, config }
    }

    fn validate_request(req: &NewTableLocation) -> DomainResult<()> {
        if req.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        if let Some(capacity) = req.capacity {
            if capacity < 1 {
                return Err(DomainError::validation("capacity must be positive"));
            }
        }
        Ok(())
    }

    /// Names are unique among locations, compared case-insensitively.
    pub async fn create(&self, req: NewTableLocation) -> DomainResult<TableLocation> {
        Self::validate_request(&req)?;

        let name = req.name.trim();
        if self.repos.tables().find_by_name(name).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "table location '{}' already exists",
                name
            )));
        }

        let id = self.repos.tables().next_id().await;
        let table = TableLocation::new(id, name, req.capacity, req.image_url);
        self.repos.tables().save(table.clone()).await?;

        info!(table_location_id = id, name = %table.name, "Table location created");
        Ok(table)
    }

    pub async fn get(&self, id: i32) -> DomainResult<TableLocation> {
        if id < 1 {
            return Err(DomainError::validation(
                "table_location_id must be positive",
            ));
        }
        self.repos
            .tables()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "TableLocation",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn list(&self) -> DomainResult<Vec<TableLocation>> {
        let mut tables = self.repos.tables().find_all().await?;
        tables.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(tables)
    }

    pub async fn update(&self, id: i32, req: NewTableLocation) -> DomainResult<TableLocation> {
        let mut table = self.get(id).await?;
        Self::validate_request(&req)?;

        let name = req.name.trim();
        if let Some(other) = self.repos.tables().find_by_name(name).await? {
            if other.id != id {
                return Err(DomainError::conflict(format!(
                    "table location '{}' already exists",
                    name
                )));
            }
        }

        table.name = name.to_string();
        table.capacity = req.capacity;
        table.image_url = req.image_url;
        table.updated_at = Utc::now();
        self.repos.tables().update(table.clone()).await?;

        info!(table_location_id = id, name = %table.name, "Table location updated");
        Ok(table)
    }

    /// Deletion is refused while the location still has upcoming
    /// non-cancelled bookings.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.get(id).await?;

        let now = Utc::now();
        let active = self.repos.bookings().find_active_for_table(id).await?;
        let upcoming = active.iter().filter(|b| b.is_upcoming(now)).count();
        if upcoming > 0 {
            return Err(DomainError::conflict(format!(
                "table location {} still has {} upcoming booking(s)",
                id, upcoming
            )));
        }

        self.repos.tables().delete(id).await?;
        info!(table_location_id = id, "Table location deleted");
        Ok(())
    }

    pub async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.repos.tables().find_by_id(id).await?.is_some())
    }

    /// All locations that can host the requested slot: enough capacity
    /// (when tracked) and no overlapping booking. A past start yields an
    /// empty list.
    pub async fn available_tables(
        &self,
        starts_at: DateTime<Utc>,
        party_size: i32,
        duration_hours: Option<i64>,
    ) -> DomainResult<Vec<TableLocation>> {
        let duration = duration_hours.unwrap_or(self.config.default_duration_hours);
        let tables = self.list().await?;

        let mut occupied_by_table: HashMap<i32, Vec<TimeSlot>> = HashMap::new();
        for table in &tables {
            let active = self.repos.bookings().find_active_for_table(table.id).await?;
            occupied_by_table.insert(table.id, active.iter().map(Booking::slot).collect());
        }

        availability::filter_available(
            Utc::now(),
            tables,
            starts_at,
            duration,
            party_size,
            &occupied_by_table,
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::booking::{BookingService, NewBooking};
    use crate::infrastructure::storage::InMemoryStore;
    use chrono::Duration;

    fn services() -> (TableLocationService, BookingService) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
        (
            TableLocationService::new(repos.clone(), BookingConfig::default()),
            BookingService::new(repos, BookingConfig::default()),
        )
    }

    fn table_request(name: &str, capacity: Option<i32>) -> NewTableLocation {
        NewTableLocation {
            name: name.to_string(),
            capacity,
            image_url: None,
        }
    }

    fn booking_request(table_location_id: i32, starts_in_hours: i64) -> NewBooking {
        NewBooking {
            customer_name: "Alice Brown".to_string(),
            customer_email: "alice@example.com".to_string(),
            customer_phone: "0712345678".to_string(),
            table_location_id,
            starts_at: Utc::now() + Duration::hours(starts_in_hours),
            duration_hours: Some(2),
            party_size: 2,
            special_request: None,
        }
    }

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let (tables, _) = services();
        let created = tables.create(table_request("Window", Some(2))).await.unwrap();
        let fetched = tables.get(created.id).await.unwrap();
        assert_eq!(fetched.name, "Window");
        assert_eq!(fetched.capacity, Some(2));
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict_case_insensitively() {
        let (tables, _) = services();
        tables.create(table_request("Terrace", None)).await.unwrap();

        let err = tables
            .create(table_request("  TERRACE ", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let (tables, _) = services();
        let err = tables.create(table_request("   ", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn rename_to_own_name_is_allowed() {
        let (tables, _) = services();
        let created = tables.create(table_request("Garden", Some(4))).await.unwrap();

        let updated = tables
            .update(created.id, table_request("garden", Some(6)))
            .await
            .unwrap();
        assert_eq!(updated.capacity, Some(6));
    }

    #[tokio::test]
    async fn rename_onto_another_table_is_conflict() {
        let (tables, _) = services();
        tables.create(table_request("Window", None)).await.unwrap();
        let other = tables.create(table_request("Garden", None)).await.unwrap();

        let err = tables
            .update(other.id, table_request("Window", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_refused_while_upcoming_bookings_exist() {
        let (tables, bookings) = services();
        let table = tables.create(table_request("Window", Some(4))).await.unwrap();
        let booking = bookings.create(booking_request(table.id, 6)).await.unwrap();

        let err = tables.delete(table.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // cancelling the booking unblocks the delete
        bookings.cancel(booking.id).await.unwrap();
        tables.delete(table.id).await.unwrap();
        assert!(!tables.exists(table.id).await.unwrap());
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let (tables, _) = services();
        tables.create(table_request("Terrace", None)).await.unwrap();
        tables.create(table_request("bar", None)).await.unwrap();
        tables.create(table_request("Garden", None)).await.unwrap();

        let names: Vec<String> = tables
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["bar", "Garden", "Terrace"]);
    }

    #[tokio::test]
    async fn available_tables_filters_capacity_and_occupancy() {
        let (tables, bookings) = services();
        let small = tables.create(table_request("Window", Some(2))).await.unwrap();
        let large = tables.create(table_request("Main Hall", Some(8))).await.unwrap();
        let untracked = tables.create(table_request("Bar", None)).await.unwrap();

        // occupy the large table around +6h
        bookings.create(booking_request(large.id, 6)).await.unwrap();

        let starts = Utc::now() + Duration::hours(7);
        let free = tables.available_tables(starts, 4, None).await.unwrap();
        let ids: Vec<i32> = free.iter().map(|t| t.id).collect();

        // small lacks capacity, large is occupied
        assert!(!ids.contains(&small.id));
        assert!(!ids.contains(&large.id));
        assert!(ids.contains(&untracked.id));

        // after the slot ends the large table is back
        let later = Utc::now() + Duration::hours(10);
        let free = tables.available_tables(later, 4, None).await.unwrap();
        let ids: Vec<i32> = free.iter().map(|t| t.id).collect();
        assert!(ids.contains(&large.id));
    }

    #[tokio::test]
    async fn available_tables_with_past_start_is_empty() {
        let (tables, _) = services();
        tables.create(table_request("Window", Some(4))).await.unwrap();

        let past = Utc::now() - Duration::hours(2);
        let free = tables.available_tables(past, 2, None).await.unwrap();
        assert!(free.is_empty());
    }
}
