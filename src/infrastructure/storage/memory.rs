//! In-memory storage implementation
//!
//! DashMap-backed repositories. This is the production store for the
//! service (persistence is out of scope) and doubles as the test double
//! for service-level tests.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;

use crate::domain::{
    Booking, BookingRepository, BookingStatus, DomainError, DomainResult, RepositoryProvider,
    TableLocation, TableLocationRepository,
};

/// In-memory store for bookings and table locations
pub struct InMemoryStore {
    bookings: DashMap<i32, Booking>,
    tables: DashMap<i32, TableLocation>,
    booking_counter: AtomicI32,
    table_counter: AtomicI32,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
            tables: DashMap::new(),
            booking_counter: AtomicI32::new(1),
            table_counter: AtomicI32::new(1),
        }
    }

    /// Store pre-seeded with a typical floor plan, for demos and tests
    pub fn with_demo_tables() -> Self {
        let store = Self::new();

        let seed = [
            ("Window", Some(2), None),
            ("Main Hall", Some(6), None),
            ("Terrace", Some(4), Some("/img/terrace.jpg")),
            ("Private Room", Some(10), None),
            ("Bar", None, None),
        ];
        for (name, capacity, image) in seed {
            let id = store.table_counter.fetch_add(1, Ordering::SeqCst);
            store.tables.insert(
                id,
                TableLocation::new(id, name, capacity, image.map(String::from)),
            );
        }

        store
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStore {
    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn tables(&self) -> &dyn TableLocationRepository {
        self
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn save(&self, booking: Booking) -> DomainResult<()> {
        if self.bookings.contains_key(&booking.id) {
            return Err(DomainError::conflict(format!(
                "booking {} already exists",
                booking.id
            )));
        }
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        if !self.bookings.contains_key(&booking.id) {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking.id.to_string(),
            });
        }
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.bookings.remove(&id).ok_or(DomainError::NotFound {
            entity: "Booking",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        Ok(self.bookings.iter().map(|b| b.clone()).collect())
    }

    async fn find_active_for_table(&self, table_location_id: i32) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.table_location_id == table_location_id && b.blocks_availability())
            .map(|b| b.clone())
            .collect())
    }

    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.starts_at.date_naive() == date)
            .map(|b| b.clone())
            .collect())
    }

    async fn find_by_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.starts_at >= from && b.starts_at <= to)
            .map(|b| b.clone())
            .collect())
    }

    async fn find_by_status(&self, status: BookingStatus) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.status == status)
            .map(|b| b.clone())
            .collect())
    }

    async fn next_id(&self) -> i32 {
        self.booking_counter.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl TableLocationRepository for InMemoryStore {
    async fn save(&self, table: TableLocation) -> DomainResult<()> {
        if self.tables.contains_key(&table.id) {
            return Err(DomainError::conflict(format!(
                "table location {} already exists",
                table.id
            )));
        }
        self.tables.insert(table.id, table);
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<TableLocation>> {
        Ok(self.tables.get(&id).map(|t| t.clone()))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<TableLocation>> {
        Ok(self
            .tables
            .iter()
            .find(|t| t.name_matches(name))
            .map(|t| t.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<TableLocation>> {
        Ok(self.tables.iter().map(|t| t.clone()).collect())
    }

    async fn update(&self, table: TableLocation) -> DomainResult<()> {
        if !self.tables.contains_key(&table.id) {
            return Err(DomainError::NotFound {
                entity: "TableLocation",
                field: "id",
                value: table.id.to_string(),
            });
        }
        self.tables.insert(table.id, table);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.tables.remove(&id).ok_or(DomainError::NotFound {
            entity: "TableLocation",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }

    async fn next_id(&self) -> i32 {
        self.table_counter.fetch_add(1, Ordering::SeqCst)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_booking(id: i32, table_location_id: i32) -> Booking {
        Booking::new(
            id,
            "Alice Brown",
            "alice@example.com",
            "0712345678",
            table_location_id,
            Utc::now() + Duration::hours(6),
            2,
            4,
            None,
        )
    }

    #[tokio::test]
    async fn booking_ids_are_sequential() {
        let store = InMemoryStore::new();
        let first = BookingRepository::next_id(&store).await;
        let second = BookingRepository::next_id(&store).await;
        assert_eq!(second, first + 1);
    }

    #[tokio::test]
    async fn save_and_find_booking() {
        let store = InMemoryStore::new();
        store.bookings().save(sample_booking(1, 2)).await.unwrap();

        let found = store.bookings().find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.table_location_id, 2);
        assert!(store.bookings().find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_booking_id_is_conflict() {
        let store = InMemoryStore::new();
        store.bookings().save(sample_booking(1, 2)).await.unwrap();
        let err = store.bookings().save(sample_booking(1, 3)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn active_snapshot_excludes_cancelled() {
        let store = InMemoryStore::new();
        store.bookings().save(sample_booking(1, 5)).await.unwrap();

        let mut cancelled = sample_booking(2, 5);
        cancelled.cancel();
        store.bookings().save(cancelled).await.unwrap();

        // different table, must not leak into the snapshot
        store.bookings().save(sample_booking(3, 8)).await.unwrap();

        let active = store.bookings().find_active_for_table(5).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 1);
    }

    #[tokio::test]
    async fn date_and_range_queries_match_start_time() {
        let store = InMemoryStore::new();
        let mut b = sample_booking(1, 2);
        b.starts_at = Utc::now() + Duration::days(3);
        let target_date = b.starts_at.date_naive();
        store.bookings().save(b.clone()).await.unwrap();
        store.bookings().save(sample_booking(2, 2)).await.unwrap();

        let by_date = store.bookings().find_by_date(target_date).await.unwrap();
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].id, 1);

        let by_range = store
            .bookings()
            .find_by_range(b.starts_at - Duration::hours(1), b.starts_at + Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(by_range.len(), 1);
        assert_eq!(by_range[0].id, 1);
    }

    #[tokio::test]
    async fn status_query_filters() {
        let store = InMemoryStore::new();
        store.bookings().save(sample_booking(1, 2)).await.unwrap();
        let mut done = sample_booking(2, 2);
        done.complete();
        store.bookings().save(done).await.unwrap();

        let completed = store
            .bookings()
            .find_by_status(BookingStatus::Completed)
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, 2);
    }

    #[tokio::test]
    async fn update_missing_booking_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.bookings().update(sample_booking(7, 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn table_name_lookup_is_case_insensitive() {
        let store = InMemoryStore::with_demo_tables();
        let found = store.tables().find_by_name("private room").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "Private Room");
        assert!(store.tables().find_by_name("Rooftop").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn demo_tables_are_seeded_with_fresh_counter() {
        let store = InMemoryStore::with_demo_tables();
        let tables = store.tables().find_all().await.unwrap();
        assert_eq!(tables.len(), 5);

        // next id continues after the seeded ones
        let next = TableLocationRepository::next_id(&store).await;
        assert_eq!(next, 6);
    }

    #[tokio::test]
    async fn delete_table_removes_it() {
        let store = InMemoryStore::new();
        store
            .tables()
            .save(TableLocation::new(1, "Window", Some(2), None))
            .await
            .unwrap();
        store.tables().delete(1).await.unwrap();
        assert!(store.tables().find_by_id(1).await.unwrap().is_none());

        let err = store.tables().delete(1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
