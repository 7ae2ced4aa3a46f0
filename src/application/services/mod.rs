//! Application services

pub mod booking;
pub mod table_location;

pub use booking::{BookingService, BookingStatistics, NewBooking, TablePopularity};
pub use table_location::{NewTableLocation, TableLocationService};
