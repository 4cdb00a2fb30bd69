//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors)
//! - `ahp` - Priority vectors, consistency ratios and hierarchical aggregation

pub mod ahp;
pub mod foundation;
