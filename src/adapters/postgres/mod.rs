//! PostgreSQL adapters - Database implementations of the AHP ports.
//!
//! `PostgresAhpStore` implements every port over one `PgPool`:
//! - reads in `ahp_store`
//! - judgment writes in `judgment_writer`
//! - results and recommendations in `result_store`

mod ahp_store;
mod judgment_writer;
mod result_store;

pub use ahp_store::PostgresAhpStore;
