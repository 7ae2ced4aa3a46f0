//! Transport interfaces exposed by the service.

pub mod http;
