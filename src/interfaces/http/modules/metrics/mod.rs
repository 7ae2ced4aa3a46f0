//! Prometheus wiring for the reservation API: the scrape endpoint and
//! the per-request recording middleware

pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::http_metrics_middleware;
