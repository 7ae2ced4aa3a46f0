//! # Tablebook Reservation Service
//!
//! Restaurant table reservation service with an overlap-free availability engine.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the availability engine and repository traits
//! - **application**: Booking and table location services orchestrating the domain
//! - **infrastructure**: Storage implementations
//! - **interfaces**: REST API with Swagger documentation
//! - **config**: TOML configuration loading
//! - **shared**: Error taxonomy and shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export storage for easy access
pub use infrastructure::InMemoryStore;

// Re-export API router
pub use interfaces::http::create_api_router;
