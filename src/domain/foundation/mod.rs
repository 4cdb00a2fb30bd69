//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, value objects, and error types
//! that form the vocabulary of the platform evaluation domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AlternativeId, CriterionId, SessionId};
pub use timestamp::Timestamp;
