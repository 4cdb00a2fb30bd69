//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory store for tests and local runs
//! - `postgres` - PostgreSQL store

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAhpStore;
pub use postgres::PostgresAhpStore;
