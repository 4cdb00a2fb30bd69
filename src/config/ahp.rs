//! AHP engine settings

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::ahp::{AggregationOptions, MissingJudgmentPolicy, CONSISTENCY_THRESHOLD};

/// How calculations treat gaps and inconsistency, and how strictly recorded
/// judgments are checked against the Saaty scale.
#[derive(Debug, Clone, Deserialize)]
pub struct AhpConfig {
    /// Consistency ratio above which a group is reported as inconsistent
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Treatment of pairs that were never compared
    #[serde(default)]
    pub missing_judgments: MissingJudgmentPolicy,

    /// Fail a calculation instead of warning when a group is inconsistent
    #[serde(default)]
    pub enforce_consistency: bool,

    /// Slack around [1/9, 9] accepted for recorded judgments
    #[serde(default = "default_scale_tolerance")]
    pub judgment_scale_tolerance: f64,
}

impl AhpConfig {
    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            missing_judgments: self.missing_judgments,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let threshold = self.consistency_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ValidationError::InvalidConsistencyThreshold(threshold));
        }
        let tolerance = self.judgment_scale_tolerance;
        if !tolerance.is_finite() || !(0.0..0.1).contains(&tolerance) {
            return Err(ValidationError::InvalidScaleTolerance(tolerance));
        }
        Ok(())
    }
}

impl Default for AhpConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            missing_judgments: MissingJudgmentPolicy::default(),
            enforce_consistency: false,
            judgment_scale_tolerance: default_scale_tolerance(),
        }
    }
}

fn default_consistency_threshold() -> f64 {
    CONSISTENCY_THRESHOLD
}

fn default_scale_tolerance() -> f64 {
    1e-3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_advisory_and_lenient() {
        let config = AhpConfig::default();
        assert_eq!(config.consistency_threshold, 0.10);
        assert_eq!(config.missing_judgments, MissingJudgmentPolicy::AssumeEqual);
        assert!(!config.enforce_consistency);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn threshold_must_be_a_ratio() {
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let config = AhpConfig {
                consistency_threshold: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted {}", bad);
        }
        let one = AhpConfig {
            consistency_threshold: 1.0,
            ..Default::default()
        };
        assert!(one.validate().is_ok());
    }

    #[test]
    fn tolerance_must_stay_small() {
        let config = AhpConfig {
            judgment_scale_tolerance: 0.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidScaleTolerance(0.5))
        );
    }

    #[test]
    fn aggregation_options_carry_policy() {
        let config = AhpConfig {
            missing_judgments: MissingJudgmentPolicy::Reject,
            ..Default::default()
        };
        assert_eq!(
            config.aggregation_options().missing_judgments,
            MissingJudgmentPolicy::Reject
        );
    }
}
