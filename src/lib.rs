//! Platform AHP - Analytic Hierarchy Process engine
//!
//! Ranks candidate software platforms from pairwise judgments over a
//! two-level criteria hierarchy. Priority vectors use the row geometric
//! mean; consistency ratios are reported but never block a result.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
