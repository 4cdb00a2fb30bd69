//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod ahp;

pub use ahp::{
    AhpResultView, CalculateAhpCommand, CalculateAhpHandler, CalculateAhpResult,
    GetAhpResultHandler, GetAhpResultQuery, RecordAlternativeJudgmentsCommand,
    RecordCriteriaJudgmentsCommand, RecordJudgmentsHandler, RecordJudgmentsResult,
    SaveRecommendationCommand, SaveRecommendationHandler,
};
