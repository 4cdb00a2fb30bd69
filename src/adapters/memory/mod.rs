//! In-memory adapters - Collection-backed implementations of the ports.

mod ahp_store;

pub use ahp_store::InMemoryAhpStore;
