//! HTTP interface: REST API, OpenAPI doc and shared extractors.

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
