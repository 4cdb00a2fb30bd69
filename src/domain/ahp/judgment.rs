//! Pairwise judgments and the groups they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{AlternativeId, CriterionId, ValidationError};

/// Smallest value on the reciprocal Saaty scale (1/9).
pub const SAATY_MIN: f64 = 1.0 / 9.0;

/// Largest value on the reciprocal Saaty scale.
pub const SAATY_MAX: f64 = 9.0;

/// How strongly entity `i` is preferred over entity `j`.
///
/// Always strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct JudgmentValue(f64);

impl JudgmentValue {
    /// Equal preference.
    pub const EQUAL: JudgmentValue = JudgmentValue(1.0);

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::invalid_format(
                "comparison_value",
                format!("must be a positive finite number, got {}", value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The value for the reversed comparison.
    pub fn reciprocal(&self) -> Self {
        Self(1.0 / self.0)
    }

    /// Checks that the value lies on the Saaty range [1/9, 9].
    ///
    /// `tolerance` absorbs rounded inputs such as 0.111 for 1/9.
    pub fn ensure_on_saaty_scale(&self, tolerance: f64) -> Result<(), ValidationError> {
        if self.0 < SAATY_MIN - tolerance || self.0 > SAATY_MAX + tolerance {
            return Err(ValidationError::out_of_range(
                "comparison_value",
                SAATY_MIN,
                SAATY_MAX,
                self.0,
            ));
        }
        Ok(())
    }
}

impl TryFrom<f64> for JudgmentValue {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        JudgmentValue::new(value)
    }
}

impl From<JudgmentValue> for f64 {
    fn from(value: JudgmentValue) -> Self {
        value.0
    }
}

/// Identifies the comparison set a judgment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonGroup {
    /// Top-level criteria compared against each other.
    Level1,
    /// Children of one level-1 criterion compared against each other.
    Level2 { parent_id: CriterionId },
    /// Alternatives compared under one level-2 criterion.
    Alternatives { criterion_id: CriterionId },
}

impl ComparisonGroup {
    /// The criteria group for a parent; `None` means the top level.
    pub fn for_parent(parent_id: Option<CriterionId>) -> Self {
        match parent_id {
            None => ComparisonGroup::Level1,
            Some(parent_id) => ComparisonGroup::Level2 { parent_id },
        }
    }
}

impl fmt::Display for ComparisonGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonGroup::Level1 => write!(f, "level1"),
            ComparisonGroup::Level2 { parent_id } => write!(f, "level2:{}", parent_id),
            ComparisonGroup::Alternatives { criterion_id } => {
                write!(f, "alternatives:{}", criterion_id)
            }
        }
    }
}

/// A judgment between two criteria sharing the same parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaJudgment {
    /// `None` for level-1 comparisons.
    pub parent_id: Option<CriterionId>,
    pub criterion_i: CriterionId,
    pub criterion_j: CriterionId,
    pub value: JudgmentValue,
}

impl CriteriaJudgment {
    pub fn new(
        parent_id: Option<CriterionId>,
        criterion_i: CriterionId,
        criterion_j: CriterionId,
        value: JudgmentValue,
    ) -> Self {
        Self {
            parent_id,
            criterion_i,
            criterion_j,
            value,
        }
    }

    pub fn group(&self) -> ComparisonGroup {
        ComparisonGroup::for_parent(self.parent_id)
    }

    /// Rewrites the judgment so the smaller id comes first.
    pub fn canonical(self) -> Self {
        if self.criterion_i <= self.criterion_j {
            return self;
        }
        Self {
            parent_id: self.parent_id,
            criterion_i: self.criterion_j,
            criterion_j: self.criterion_i,
            value: self.value.reciprocal(),
        }
    }
}

/// A judgment between two alternatives under one level-2 criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlternativeJudgment {
    pub criterion_id: CriterionId,
    pub alternative_i: AlternativeId,
    pub alternative_j: AlternativeId,
    pub value: JudgmentValue,
}

impl AlternativeJudgment {
    pub fn new(
        criterion_id: CriterionId,
        alternative_i: AlternativeId,
        alternative_j: AlternativeId,
        value: JudgmentValue,
    ) -> Self {
        Self {
            criterion_id,
            alternative_i,
            alternative_j,
            value,
        }
    }

    pub fn group(&self) -> ComparisonGroup {
        ComparisonGroup::Alternatives {
            criterion_id: self.criterion_id,
        }
    }

    /// Rewrites the judgment so the smaller id comes first.
    pub fn canonical(self) -> Self {
        if self.alternative_i <= self.alternative_j {
            return self;
        }
        Self {
            criterion_id: self.criterion_id,
            alternative_i: self.alternative_j,
            alternative_j: self.alternative_i,
            value: self.value.reciprocal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judgment_value_rejects_non_positive() {
        assert!(JudgmentValue::new(0.0).is_err());
        assert!(JudgmentValue::new(-2.0).is_err());
        assert!(JudgmentValue::new(f64::NAN).is_err());
        assert!(JudgmentValue::new(f64::INFINITY).is_err());
        assert!(JudgmentValue::new(3.0).is_ok());
    }

    #[test]
    fn judgment_value_deserialization_validates() {
        assert!(serde_json::from_str::<JudgmentValue>("0").is_err());
        let value: JudgmentValue = serde_json::from_str("5").unwrap();
        assert_eq!(value.value(), 5.0);
    }

    #[test]
    fn saaty_scale_accepts_rounded_ninth() {
        let ninth = JudgmentValue::new(0.111).unwrap();
        assert!(ninth.ensure_on_saaty_scale(1e-3).is_ok());
        assert!(ninth.ensure_on_saaty_scale(0.0).is_err());
    }

    #[test]
    fn saaty_scale_rejects_out_of_range() {
        assert!(JudgmentValue::new(12.0)
            .unwrap()
            .ensure_on_saaty_scale(1e-3)
            .is_err());
        assert!(JudgmentValue::new(0.05)
            .unwrap()
            .ensure_on_saaty_scale(1e-3)
            .is_err());
    }

    #[test]
    fn canonical_swaps_and_inverts() {
        let (small, large) = ordered_pair();
        let judgment = AlternativeJudgment::new(
            CriterionId::new(),
            large,
            small,
            JudgmentValue::new(4.0).unwrap(),
        );

        let canonical = judgment.canonical();
        assert_eq!(canonical.alternative_i, small);
        assert_eq!(canonical.alternative_j, large);
        assert!((canonical.value.value() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn canonical_keeps_ordered_judgment() {
        let a = CriterionId::new();
        let b = CriterionId::new();
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        let judgment = CriteriaJudgment::new(None, i, j, JudgmentValue::new(3.0).unwrap());

        assert_eq!(judgment.canonical(), judgment);
    }

    #[test]
    fn group_labels_are_readable() {
        let id: CriterionId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(ComparisonGroup::Level1.to_string(), "level1");
        assert_eq!(
            ComparisonGroup::for_parent(Some(id)).to_string(),
            "level2:550e8400-e29b-41d4-a716-446655440000"
        );
    }

    fn ordered_pair() -> (AlternativeId, AlternativeId) {
        let a = AlternativeId::new();
        let b = AlternativeId::new();
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }
}
