//! AHP Module - Analytic Hierarchy Process engine.
//!
//! Turns pairwise comparison judgments into priority weights, measures how
//! consistent those judgments are, and composes a two-level criteria
//! hierarchy with per-criterion alternative priorities into final scores.
//!
//! # Components
//!
//! - `PriorityCalculator` - Row geometric mean priority vectors
//! - `ConsistencyEvaluator` - Saaty consistency ratio (advisory only)
//! - `HierarchicalAggregator` - Weights multiplied down the hierarchy and summed
//!
//! Everything here is pure and synchronous. Loading inputs and storing
//! results goes through the ports.

mod aggregator;
mod consistency;
mod criterion;
mod errors;
mod judgment;
mod judgment_set;
mod matrix;
mod priority;
mod recommendation;
mod result;

pub use aggregator::{
    AggregationOptions, AhpSnapshot, GroupOutcome, HierarchicalAggregator, MissingJudgmentPolicy,
};
pub use consistency::{
    random_index, ConsistencyEvaluator, CONSISTENCY_THRESHOLD, RANDOM_INDEX,
    RANDOM_INDEX_FALLBACK,
};
pub use criterion::{Alternative, CriteriaHierarchy, Criterion, CriterionLevel};
pub use errors::AhpError;
pub use judgment::{
    AlternativeJudgment, ComparisonGroup, CriteriaJudgment, JudgmentValue, SAATY_MAX, SAATY_MIN,
};
pub use judgment_set::JudgmentSet;
pub use matrix::ComparisonMatrix;
pub use priority::{PriorityCalculator, PriorityVector};
pub use recommendation::Recommendation;
pub use result::{AggregateResult, RankedAlternative, CALCULATION_METHOD, LEVEL1_GROUP_LABEL};
