//! Domain layer: entities, the availability engine, and repository traits

pub mod availability;
pub mod booking;
pub mod repositories;
pub mod table_location;

// Re-export commonly used types
pub use availability::TimeSlot;
pub use booking::{Booking, BookingRepository, BookingStatus};
pub use repositories::{DomainResult, RepositoryProvider};
pub use table_location::{TableLocation, TableLocationRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
