//! Application layer: use cases orchestrating the domain

pub mod services;

// Re-export key types for convenience
pub use services::{
    BookingService, BookingStatistics, NewBooking, NewTableLocation, TableLocationService,
    TablePopularity,
};
