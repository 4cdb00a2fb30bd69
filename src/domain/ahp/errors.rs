//! AHP engine error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InputValidation | 400 |
//! | InsufficientData | 422 |
//! | ConsistencyThresholdExceeded | 422 |
//! | DataAccess | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised while validating inputs for, running, or persisting an
/// AHP calculation.
///
/// Every variant aborts the whole aggregation; no partial result is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    /// A judgment value outside (0, inf), a malformed criteria tree, or a
    /// comparison referencing an entity that is not part of its group.
    #[error("Invalid input for '{field}': {message}")]
    InputValidation { field: String, message: String },

    /// Nothing to rank against: no active level-1 criteria or no active
    /// alternatives, or a group is incomplete under the strict policy.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The consistency ratio of a group exceeded the configured threshold.
    ///
    /// Only raised when a caller opts into enforcing consistency; the engine
    /// itself always treats the ratio as advisory.
    #[error("Consistency ratio {ratio:.4} for group '{group}' exceeds threshold {threshold}")]
    ConsistencyThresholdExceeded {
        group: String,
        ratio: f64,
        threshold: f64,
    },

    /// Propagated unchanged from the data layer.
    #[error("Data access failed: {0}")]
    DataAccess(DomainError),
}

impl AhpError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AhpError::InputValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn insufficient(message: impl Into<String>) -> Self {
        AhpError::InsufficientData(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::InputValidation { .. } => ErrorCode::ValidationFailed,
            AhpError::InsufficientData(_) => ErrorCode::InsufficientData,
            AhpError::ConsistencyThresholdExceeded { .. } => {
                ErrorCode::ConsistencyThresholdExceeded
            }
            AhpError::DataAccess(err) => err.code,
        }
    }

    /// Returns true if retrying the same call might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AhpError::DataAccess(_))
    }
}

impl From<DomainError> for AhpError {
    fn from(err: DomainError) -> Self {
        AhpError::DataAccess(err)
    }
}

impl From<ValidationError> for AhpError {
    fn from(err: ValidationError) -> Self {
        AhpError::InputValidation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AhpError> for DomainError {
    fn from(err: AhpError) -> Self {
        match err {
            AhpError::DataAccess(inner) => inner,
            AhpError::InputValidation { field, message } => DomainError::validation(field, message),
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_access_keeps_underlying_error() {
        let inner = DomainError::database("connection reset");
        let err: AhpError = inner.clone().into();

        assert_eq!(err, AhpError::DataAccess(inner.clone()));
        assert_eq!(err.code(), ErrorCode::DatabaseError);

        let back: DomainError = err.into();
        assert_eq!(back, inner);
    }

    #[test]
    fn only_data_access_is_retryable() {
        assert!(AhpError::DataAccess(DomainError::database("down")).is_retryable());
        assert!(!AhpError::insufficient("no alternatives").is_retryable());
        assert!(!AhpError::validation("value", "must be positive").is_retryable());
    }

    #[test]
    fn validation_error_maps_to_input_validation() {
        let err: AhpError = ValidationError::empty_field("code").into();
        match err {
            AhpError::InputValidation { field, .. } => assert_eq!(field, "code"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn threshold_error_displays_group_and_ratio() {
        let err = AhpError::ConsistencyThresholdExceeded {
            group: "level1".to_string(),
            ratio: 0.23456,
            threshold: 0.1,
        };
        assert_eq!(
            err.to_string(),
            "Consistency ratio 0.2346 for group 'level1' exceeds threshold 0.1"
        );
        assert_eq!(err.code(), ErrorCode::ConsistencyThresholdExceeded);
    }
}
