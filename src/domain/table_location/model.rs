//! Table location domain entity

use chrono::{DateTime, Utc};

/// A bookable table location in the restaurant
#[derive(Debug, Clone)]
pub struct TableLocation {
    /// Unique table location ID
    pub id: i32,
    /// Display name, unique among locations (case-insensitive)
    pub name: String,
    /// Seats at this location. `None` means capacity is not tracked
    /// and the location accepts any party size.
    pub capacity: Option<i32>,
    /// Optional picture shown to guests
    pub image_url: Option<String>,
    /// When the location was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl TableLocation {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        capacity: Option<i32>,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            capacity,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Capacity check; untracked capacity accepts any party size.
    pub fn can_seat(&self, party_size: i32) -> bool {
        self.capacity.map_or(true, |c| c >= party_size)
    }

    /// Case-insensitive name comparison used for uniqueness checks
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other.trim())
    }
}

// ── Tests ──────────────────────────────────────────────────────
