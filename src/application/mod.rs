//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates the AHP engine and the ports. Commands record judgments,
//! run calculations and save recommendations; queries read stored results.

pub mod handlers;

pub use handlers::{
    AhpResultView, CalculateAhpCommand, CalculateAhpHandler, CalculateAhpResult,
    GetAhpResultHandler, GetAhpResultQuery, RecordAlternativeJudgmentsCommand,
    RecordCriteriaJudgmentsCommand, RecordJudgmentsHandler, RecordJudgmentsResult,
    SaveRecommendationCommand, SaveRecommendationHandler,
};
