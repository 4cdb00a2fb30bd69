//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the AHP engine and the outside world. Adapters implement these ports.
//!
//! ## Read Ports
//!
//! - `AhpDataReader` - Active criteria, alternatives, and session judgments
//!
//! ## Write Ports
//!
//! - `JudgmentRepository` - Pairwise judgment upserts
//! - `AhpResultRepository` - Latest calculation result per session
//! - `RecommendationRepository` - Recommendation per session

mod ahp_data_reader;
mod ahp_result_repository;
mod judgment_repository;
mod recommendation_repository;

pub use ahp_data_reader::AhpDataReader;
pub use ahp_result_repository::{AhpResultRepository, StoredAhpResult};
pub use judgment_repository::JudgmentRepository;
pub use recommendation_repository::{RecommendationRepository, StoredRecommendation};
