//! Availability engine
//!
//! Pure overlap detection over reservation time slots. The engine owns no
//! state and performs no I/O: callers load the relevant bookings, convert
//! them to [`TimeSlot`]s and ask for a verdict. Cancelled bookings must be
//! filtered out by the caller before the snapshot reaches the engine.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::domain::table_location::TableLocation;
use crate::domain::{DomainError, DomainResult};

/// Half-open occupancy interval `[start, end)`.
///
/// Two slots overlap iff each one starts before the other ends. Back-to-back
/// slots (one ending exactly when the next starts) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    /// Build a slot from a start time and a duration in whole hours.
    ///
    /// A non-positive or out-of-range duration is a caller error, never a
    /// verdict.
    pub fn new(start: DateTime<Utc>, duration_hours: i64) -> DomainResult<Self> {
        if duration_hours <= 0 {
            return Err(DomainError::validation(format!(
                "duration_hours must be positive, got {}",
                duration_hours
            )));
        }
        let end = Duration::try_hours(duration_hours)
            .and_then(|span| start.checked_add_signed(span))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "duration_hours is out of range, got {}",
                    duration_hours
                ))
            })?;
        Ok(Self { start, end })
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Check whether a requested slot is free given the occupied slots of one
/// table.
///
/// - a non-positive or out-of-range `duration_hours` is a validation error;
/// - a start that is not strictly in the future yields `Ok(false)`;
/// - otherwise the slot is available iff it overlaps none of `occupied`.
pub fn is_available(
    now: DateTime<Utc>,
    requested_start: DateTime<Utc>,
    duration_hours: i64,
    occupied: &[TimeSlot],
) -> DomainResult<bool> {
    let requested = TimeSlot::new(requested_start, duration_hours)?;
    if requested_start <= now {
        return Ok(false);
    }
    Ok(!occupied.iter().any(|slot| slot.overlaps(&requested)))
}

/// Filter `tables` down to those that can host the requested slot.
///
/// A table passes when its capacity (if tracked) is at least `party_size`
/// and none of its occupied slots overlap the request. Input order is
/// preserved; a past start yields an empty result rather than an error.
pub fn filter_available(
    now: DateTime<Utc>,
    tables: Vec<TableLocation>,
    requested_start: DateTime<Utc>,
    duration_hours: i64,
    party_size: i32,
    occupied_by_table: &HashMap<i32, Vec<TimeSlot>>,
) -> DomainResult<Vec<TableLocation>> {
    if party_size <= 0 {
        return Err(DomainError::validation(format!(
            "party_size must be positive, got {}",
            party_size
        )));
    }
    let requested = TimeSlot::new(requested_start, duration_hours)?;
    if requested_start <= now {
        return Ok(Vec::new());
    }

    Ok(tables
        .into_iter()
        .filter(|table| table.can_seat(party_size))
        .filter(|table| {
            occupied_by_table
                .get(&table.id)
                .map_or(true, |slots| !slots.iter().any(|s| s.overlaps(&requested)))
        })
        .collect())
}

// ── Tests ──────────────────────────────────────────────────────
