//! Booking domain entity

use chrono::{DateTime, Duration, Utc};

use crate::domain::availability::TimeSlot;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Booking confirmed for the requested slot
    Confirmed,
    /// Guests showed up and the visit is over
    Completed,
    /// Booking cancelled by guest or staff
    Cancelled,
    /// Guests never showed up
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "No-Show",
        }
    }

    /// Strict parse; unknown strings are the caller's validation problem.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Confirmed" => Some(Self::Confirmed),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            "No-Show" => Some(Self::NoShow),
            _ => None,
        }
    }

    pub const ALL: [BookingStatus; 4] = [
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
        Self::NoShow,
    ];
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Table booking
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: i32,
    /// Guest name
    pub customer_name: String,
    /// Guest contact email
    pub customer_email: String,
    /// Guest contact phone
    pub customer_phone: String,
    /// Table location being booked
    pub table_location_id: i32,
    /// Start of the reserved slot
    pub starts_at: DateTime<Utc>,
    /// Length of the reserved slot in whole hours
    pub duration_hours: i64,
    /// Number of guests
    pub party_size: i32,
    /// Free-form guest note (allergies, occasion, ...)
    pub special_request: Option<String>,
    /// Current status
    pub status: BookingStatus,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
}

impl Booking {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
        customer_phone: impl Into<String>,
        table_location_id: i32,
        starts_at: DateTime<Utc>,
        duration_hours: i64,
        party_size: i32,
        special_request: Option<String>,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            customer_phone: customer_phone.into(),
            table_location_id,
            starts_at,
            duration_hours,
            party_size,
            special_request,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    /// End of the reserved slot (always derived, never stored).
    /// Durations the calendar cannot hold saturate to the datetime maximum.
    pub fn ends_at(&self) -> DateTime<Utc> {
        Duration::try_hours(self.duration_hours)
            .and_then(|span| self.starts_at.checked_add_signed(span))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// The half-open slot this booking occupies
    pub fn slot(&self) -> TimeSlot {
        TimeSlot {
            start: self.starts_at,
            end: self.ends_at(),
        }
    }

    /// Cancel this booking
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }

    /// Mark the visit as completed
    pub fn complete(&mut self) {
        self.status = BookingStatus::Completed;
    }

    /// Mark the guests as no-show
    pub fn mark_no_show(&mut self) {
        self.status = BookingStatus::NoShow;
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Whether this booking still occupies its slot.
    /// Only cancelled bookings stop blocking availability.
    pub fn blocks_availability(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Still blocking and not yet started at `now` (delete-guard check)
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.blocks_availability() && self.starts_at > now
    }
}

// ── Tests ──────────────────────────────────────────────────────
