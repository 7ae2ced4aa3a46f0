//! Storage implementations

mod memory;

pub use memory::InMemoryStore;
