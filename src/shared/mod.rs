//! Cross-cutting support types
//!
//! - `errors`: domain error taxonomy shared by all layers
//! - `shutdown`: graceful shutdown coordination

pub mod errors;
pub mod shutdown;
