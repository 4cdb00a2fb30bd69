//! AHP handlers - record judgments, calculate, read results, recommend.

mod calculate_ahp;
mod get_ahp_result;
mod record_judgments;
mod save_recommendation;

pub use calculate_ahp::{CalculateAhpCommand, CalculateAhpHandler, CalculateAhpResult};
pub use get_ahp_result::{AhpResultView, GetAhpResultHandler, GetAhpResultQuery};
pub use record_judgments::{
    RecordAlternativeJudgmentsCommand, RecordCriteriaJudgmentsCommand, RecordJudgmentsHandler,
    RecordJudgmentsResult,
};
pub use save_recommendation::{SaveRecommendationCommand, SaveRecommendationHandler};
