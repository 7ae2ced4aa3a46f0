//! Table location aggregate
//!
//! Contains the TableLocation entity and repository interface.

pub mod model;
pub mod repository;

pub use model::TableLocation;
pub use repository::TableLocationRepository;
