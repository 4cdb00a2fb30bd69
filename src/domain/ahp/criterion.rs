//! Criteria, alternatives, and the two-level criteria hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{AhpError, LEVEL1_GROUP_LABEL};
use crate::domain::foundation::{AlternativeId, CriterionId, ValidationError};

/// Tier of a criterion in the decision hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum CriterionLevel {
    /// Level 1: top-level criteria.
    Top,
    /// Level 2: sub-criteria under a level-1 parent.
    Sub,
}

impl CriterionLevel {
    /// Returns the numeric level (1 or 2).
    pub fn as_i16(&self) -> i16 {
        match self {
            CriterionLevel::Top => 1,
            CriterionLevel::Sub => 2,
        }
    }
}

impl TryFrom<i16> for CriterionLevel {
    type Error = ValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CriterionLevel::Top),
            2 => Ok(CriterionLevel::Sub),
            other => Err(ValidationError::invalid_format(
                "level",
                format!("expected 1 or 2, got {}", other),
            )),
        }
    }
}

impl From<CriterionLevel> for i16 {
    fn from(level: CriterionLevel) -> Self {
        level.as_i16()
    }
}

/// A decision criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub code: String,
    pub name: String,
    pub level: CriterionLevel,
    pub parent_id: Option<CriterionId>,
}

impl Criterion {
    /// Creates a level-1 criterion.
    pub fn top(
        id: CriterionId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::build(id, code.into(), name.into(), CriterionLevel::Top, None)
    }

    /// Creates a level-2 criterion under `parent_id`.
    pub fn sub(
        id: CriterionId,
        code: impl Into<String>,
        name: impl Into<String>,
        parent_id: CriterionId,
    ) -> Result<Self, ValidationError> {
        Self::build(id, code.into(), name.into(), CriterionLevel::Sub, Some(parent_id))
    }

    fn build(
        id: CriterionId,
        code: String,
        name: String,
        level: CriterionLevel,
        parent_id: Option<CriterionId>,
    ) -> Result<Self, ValidationError> {
        if code.trim().is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            code,
            name,
            level,
            parent_id,
        })
    }

    pub fn is_top_level(&self) -> bool {
        self.level == CriterionLevel::Top
    }
}

/// An option being ranked (a candidate platform).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: AlternativeId,
    pub name: String,
}

impl Alternative {
    pub fn new(id: AlternativeId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self { id, name })
    }
}

/// Validated two-level criteria tree.
///
/// Level-1 criteria are ordered by code, and so are the children of each
/// parent, which makes every downstream computation deterministic.
#[derive(Debug, Clone, Default)]
pub struct CriteriaHierarchy {
    top: Vec<Criterion>,
    children: HashMap<CriterionId, Vec<Criterion>>,
}

impl CriteriaHierarchy {
    /// Builds the hierarchy from the active criteria set.
    ///
    /// # Errors
    ///
    /// `InputValidation` when ids or codes repeat, a level-1 criterion has a
    /// parent or uses the reserved `level1` code, or a level-2 criterion does
    /// not reference an existing level-1 criterion.
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, AhpError> {
        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        for criterion in &criteria {
            if !ids.insert(criterion.id) {
                return Err(AhpError::validation(
                    "criteria",
                    format!("criterion {} appears more than once", criterion.id),
                ));
            }
            if !codes.insert(criterion.code.as_str()) {
                return Err(AhpError::validation(
                    "code",
                    format!("criterion code '{}' is not unique", criterion.code),
                ));
            }
        }

        let (mut top, subs): (Vec<_>, Vec<_>) =
            criteria.into_iter().partition(Criterion::is_top_level);

        if let Some(orphan) = top.iter().find(|c| c.parent_id.is_some()) {
            return Err(AhpError::validation(
                "parent_id",
                format!("level-1 criterion '{}' cannot have a parent", orphan.code),
            ));
        }
        // level-1 codes share the consistency_ratios keys with the level-1 group
        if let Some(reserved) = top.iter().find(|c| c.code == LEVEL1_GROUP_LABEL) {
            return Err(AhpError::validation(
                "code",
                format!("criterion code '{}' is reserved", reserved.code),
            ));
        }
        top.sort_by(|a, b| a.code.cmp(&b.code));

        let top_ids: HashSet<CriterionId> = top.iter().map(|c| c.id).collect();
        let mut children: HashMap<CriterionId, Vec<Criterion>> = HashMap::new();
        for sub in subs {
            let parent_id = match sub.parent_id {
                Some(parent_id) if top_ids.contains(&parent_id) => parent_id,
                Some(parent_id) => {
                    return Err(AhpError::validation(
                        "parent_id",
                        format!(
                            "level-2 criterion '{}' references unknown level-1 criterion {}",
                            sub.code, parent_id
                        ),
                    ))
                }
                None => {
                    return Err(AhpError::validation(
                        "parent_id",
                        format!("level-2 criterion '{}' has no parent", sub.code),
                    ))
                }
            };
            children.entry(parent_id).or_default().push(sub);
        }
        for list in children.values_mut() {
            list.sort_by(|a, b| a.code.cmp(&b.code));
        }

        Ok(Self { top, children })
    }

    /// Level-1 criteria, ordered by code.
    pub fn top_level(&self) -> &[Criterion] {
        &self.top
    }

    /// Level-2 children of a parent, ordered by code. Empty for unknown ids.
    pub fn children_of(&self, parent_id: &CriterionId) -> &[Criterion] {
        self.children
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All level-2 criteria, grouped by parent in level-1 order.
    pub fn leaves(&self) -> impl Iterator<Item = &Criterion> + '_ {
        self.top
            .iter()
            .flat_map(move |parent| self.children_of(&parent.id).iter())
    }

    pub fn is_top_level(&self, id: &CriterionId) -> bool {
        self.top.iter().any(|c| &c.id == id)
    }

    pub fn is_leaf(&self, id: &CriterionId) -> bool {
        self.leaves().any(|c| &c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(code: &str) -> Criterion {
        Criterion::top(CriterionId::new(), code, code).unwrap()
    }

    fn sub(code: &str, parent: &Criterion) -> Criterion {
        Criterion::sub(CriterionId::new(), code, code, parent.id).unwrap()
    }

    #[test]
    fn level_converts_from_numeric_value() {
        assert_eq!(CriterionLevel::try_from(1).unwrap(), CriterionLevel::Top);
        assert_eq!(CriterionLevel::try_from(2).unwrap(), CriterionLevel::Sub);
        assert!(CriterionLevel::try_from(3).is_err());
    }

    #[test]
    fn level_serializes_as_number() {
        assert_eq!(serde_json::to_string(&CriterionLevel::Sub).unwrap(), "2");
        let level: CriterionLevel = serde_json::from_str("1").unwrap();
        assert_eq!(level, CriterionLevel::Top);
    }

    #[test]
    fn criterion_rejects_blank_code() {
        assert!(Criterion::top(CriterionId::new(), "  ", "Cost").is_err());
    }

    #[test]
    fn alternative_rejects_blank_name() {
        assert!(Alternative::new(AlternativeId::new(), "").is_err());
    }

    #[test]
    fn hierarchy_orders_by_code() {
        let time = top("T");
        let cost = top("C");
        let c2 = sub("C2", &cost);
        let c1 = sub("C1", &cost);

        let hierarchy =
            CriteriaHierarchy::new(vec![time.clone(), c2.clone(), cost.clone(), c1.clone()])
                .unwrap();

        let codes: Vec<_> = hierarchy.top_level().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["C", "T"]);

        let children: Vec<_> = hierarchy
            .children_of(&cost.id)
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(children, vec!["C1", "C2"]);
        assert!(hierarchy.children_of(&time.id).is_empty());
    }

    #[test]
    fn leaves_follow_parent_order() {
        let b = top("B");
        let a = top("A");
        let b1 = sub("B1", &b);
        let a1 = sub("A1", &a);

        let hierarchy = CriteriaHierarchy::new(vec![b1, b, a1, a]).unwrap();
        let codes: Vec<_> = hierarchy.leaves().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "B1"]);
    }

    #[test]
    fn hierarchy_rejects_unknown_parent() {
        let cost = top("C");
        let stray = Criterion::sub(CriterionId::new(), "X1", "Stray", CriterionId::new()).unwrap();

        let err = CriteriaHierarchy::new(vec![cost, stray]).unwrap_err();
        assert!(matches!(err, AhpError::InputValidation { ref field, .. } if field == "parent_id"));
    }

    #[test]
    fn hierarchy_rejects_level2_parent() {
        let cost = top("C");
        let c1 = sub("C1", &cost);
        let nested = sub("C1a", &c1);

        assert!(CriteriaHierarchy::new(vec![cost, c1, nested]).is_err());
    }

    #[test]
    fn hierarchy_rejects_duplicate_codes() {
        let err = CriteriaHierarchy::new(vec![top("C"), top("C")]).unwrap_err();
        assert!(matches!(err, AhpError::InputValidation { ref field, .. } if field == "code"));
    }

    #[test]
    fn hierarchy_rejects_reserved_level1_code() {
        let err = CriteriaHierarchy::new(vec![top("C"), top("level1")]).unwrap_err();
        assert!(matches!(err, AhpError::InputValidation { ref field, .. } if field == "code"));
    }

    #[test]
    fn level1_code_is_allowed_for_sub_criteria() {
        let cost = top("C");
        let child = sub("level1", &cost);
        assert!(CriteriaHierarchy::new(vec![cost, child]).is_ok());
    }

    #[test]
    fn hierarchy_rejects_top_level_with_parent() {
        let mut cost = top("C");
        cost.parent_id = Some(CriterionId::new());
        assert!(CriteriaHierarchy::new(vec![cost]).is_err());
    }

    #[test]
    fn leaf_and_top_level_lookup() {
        let cost = top("C");
        let c1 = sub("C1", &cost);
        let hierarchy = CriteriaHierarchy::new(vec![cost.clone(), c1.clone()]).unwrap();

        assert!(hierarchy.is_top_level(&cost.id));
        assert!(!hierarchy.is_leaf(&cost.id));
        assert!(hierarchy.is_leaf(&c1.id));
        assert!(!hierarchy.is_top_level(&c1.id));
    }
}
