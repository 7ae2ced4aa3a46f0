//! Table location REST API module

pub mod dto;
pub mod handlers;

pub use handlers::*;
