//! Hierarchical Aggregator - composes criteria weights and alternative
//! priorities into final scores.
//!
//! The aggregation is a pure function of an [`AhpSnapshot`]. Each stage
//! returns an immutable value that the next stage consumes:
//!
//! 1. validate the criteria tree and group the judgments
//! 2. weigh the level-1 criteria
//! 3. weigh the children of every parent that has any
//! 4. derive global level-2 weights
//! 5. score alternatives under every level-2 criterion
//! 6. sum weighted local priorities per alternative

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use super::{
    AggregateResult, AhpError, Alternative, AlternativeJudgment, ConsistencyEvaluator,
    CriteriaHierarchy, CriteriaJudgment, Criterion, JudgmentSet, PriorityCalculator,
    PriorityVector, LEVEL1_GROUP_LABEL,
};
use crate::domain::foundation::{AlternativeId, CriterionId};

/// What to do with pairs that were never compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingJudgmentPolicy {
    /// Treat the pair as equally preferred (value 1). An alternative that
    /// appears in no alternative judgment at all gets no score, and neither
    /// does any alternative under a level-2 criterion with no judgments.
    #[default]
    AssumeEqual,
    /// Fail with `InsufficientData` if any pair in any group is missing.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationOptions {
    pub missing_judgments: MissingJudgmentPolicy,
}

/// Consistent read of everything one aggregation needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AhpSnapshot {
    /// Active criteria of both levels.
    pub criteria: Vec<Criterion>,
    /// Active alternatives.
    pub alternatives: Vec<Alternative>,
    pub criteria_judgments: Vec<CriteriaJudgment>,
    pub alternative_judgments: Vec<AlternativeJudgment>,
}

/// Priority vector and consistency ratio of one comparison group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutcome<K> {
    pub priorities: PriorityVector<K>,
    pub consistency_ratio: f64,
}

impl<K> GroupOutcome<K>
where
    K: Copy + Ord + fmt::Display,
{
    /// Runs the priority calculator and the consistency evaluator on one group.
    pub fn evaluate(ids: &[K], judgments: &JudgmentSet<K>) -> Self {
        let priorities = PriorityCalculator::compute(ids, judgments);
        let consistency_ratio =
            ConsistencyEvaluator::consistency_ratio(ids, judgments, &priorities.weights());
        Self {
            priorities,
            consistency_ratio,
        }
    }
}

/// Judgments split into their comparison groups.
#[derive(Debug, Default)]
struct JudgmentBook {
    top: JudgmentSet<CriterionId>,
    by_parent: HashMap<CriterionId, JudgmentSet<CriterionId>>,
    by_criterion: HashMap<CriterionId, JudgmentSet<AlternativeId>>,
}

/// Local weights of one parent's children.
struct SubCriteriaWeights<'a> {
    parent: &'a Criterion,
    children: &'a [Criterion],
    outcome: GroupOutcome<CriterionId>,
}

/// A level-2 criterion with its global weight.
struct LeafWeight<'a> {
    criterion: &'a Criterion,
    global_weight: f64,
}

type AlternativeScores = BTreeMap<AlternativeId, BTreeMap<String, f64>>;

/// Composes the full AHP hierarchy into one result.
pub struct HierarchicalAggregator;

impl HierarchicalAggregator {
    /// Computes criteria weights, alternative priorities, final scores and
    /// consistency ratios for one session snapshot.
    ///
    /// # Errors
    ///
    /// - `InputValidation` for a malformed criteria tree or a judgment that
    ///   references an entity outside its group
    /// - `InsufficientData` when there is no level-1 criterion or no
    ///   alternative, or a group is incomplete under `Reject`
    pub fn aggregate(
        snapshot: &AhpSnapshot,
        options: &AggregationOptions,
    ) -> Result<AggregateResult, AhpError> {
        let hierarchy = CriteriaHierarchy::new(snapshot.criteria.clone())?;
        if hierarchy.top_level().is_empty() {
            return Err(AhpError::insufficient("no active level-1 criteria"));
        }
        let alternatives = Self::ordered_alternatives(&snapshot.alternatives)?;
        let book = Self::collect_judgments(&hierarchy, &alternatives, snapshot)?;

        let top = Self::weigh_top_level(&hierarchy, &book, options)?;
        let subs = Self::weigh_sub_criteria(&hierarchy, &book, options)?;
        let leaves = Self::global_weights(&top, &subs);
        let alternative_scores = Self::score_alternatives(&leaves, &alternatives, &book, options)?;
        let final_scores = Self::final_scores(&leaves, &alternatives, &alternative_scores);
        let consistency_ratios = Self::consistency_ratios(&top, &subs);

        let criteria_weights = leaves
            .iter()
            .map(|leaf| (leaf.criterion.code.clone(), leaf.global_weight))
            .collect();

        Ok(AggregateResult::new(
            criteria_weights,
            alternative_scores,
            final_scores,
            consistency_ratios,
        ))
    }

    /// Alternative ids ordered by name, then id.
    fn ordered_alternatives(alternatives: &[Alternative]) -> Result<Vec<AlternativeId>, AhpError> {
        if alternatives.is_empty() {
            return Err(AhpError::insufficient("no active alternatives"));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = alternatives.iter().find(|a| !seen.insert(a.id)) {
            return Err(AhpError::validation(
                "alternatives",
                format!("alternative {} appears more than once", duplicate.id),
            ));
        }

        let mut ordered: Vec<&Alternative> = alternatives.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(ordered.into_iter().map(|a| a.id).collect())
    }

    fn collect_judgments(
        hierarchy: &CriteriaHierarchy,
        alternatives: &[AlternativeId],
        snapshot: &AhpSnapshot,
    ) -> Result<JudgmentBook, AhpError> {
        let mut book = JudgmentBook::default();

        for judgment in &snapshot.criteria_judgments {
            let (group_ids, set): (Vec<CriterionId>, &mut JudgmentSet<CriterionId>) =
                match judgment.parent_id {
                    None => (
                        hierarchy.top_level().iter().map(|c| c.id).collect(),
                        &mut book.top,
                    ),
                    Some(parent_id) if hierarchy.is_top_level(&parent_id) => (
                        hierarchy.children_of(&parent_id).iter().map(|c| c.id).collect(),
                        book.by_parent.entry(parent_id).or_default(),
                    ),
                    Some(parent_id) => {
                        return Err(AhpError::validation(
                            "criteria_judgments",
                            format!("unknown parent criterion {}", parent_id),
                        ))
                    }
                };
            for id in [judgment.criterion_i, judgment.criterion_j] {
                if !group_ids.contains(&id) {
                    return Err(AhpError::validation(
                        "criteria_judgments",
                        format!("criterion {} is not part of group {}", id, judgment.group()),
                    ));
                }
            }
            set.insert(judgment.criterion_i, judgment.criterion_j, judgment.value)?;
        }

        for judgment in &snapshot.alternative_judgments {
            if !hierarchy.is_leaf(&judgment.criterion_id) {
                return Err(AhpError::validation(
                    "alternative_judgments",
                    format!(
                        "alternatives can only be compared under a level-2 criterion, got {}",
                        judgment.criterion_id
                    ),
                ));
            }
            for id in [judgment.alternative_i, judgment.alternative_j] {
                if !alternatives.contains(&id) {
                    return Err(AhpError::validation(
                        "alternative_judgments",
                        format!("unknown alternative {}", id),
                    ));
                }
            }
            book.by_criterion
                .entry(judgment.criterion_id)
                .or_default()
                .insert(judgment.alternative_i, judgment.alternative_j, judgment.value)?;
        }

        Ok(book)
    }

    fn weigh_top_level(
        hierarchy: &CriteriaHierarchy,
        book: &JudgmentBook,
        options: &AggregationOptions,
    ) -> Result<GroupOutcome<CriterionId>, AhpError> {
        let ids: Vec<CriterionId> = hierarchy.top_level().iter().map(|c| c.id).collect();
        Self::require_complete(LEVEL1_GROUP_LABEL, &ids, &book.top, options)?;
        Ok(GroupOutcome::evaluate(&ids, &book.top))
    }

    fn weigh_sub_criteria<'a>(
        hierarchy: &'a CriteriaHierarchy,
        book: &JudgmentBook,
        options: &AggregationOptions,
    ) -> Result<Vec<SubCriteriaWeights<'a>>, AhpError> {
        let empty = JudgmentSet::new();
        let mut weighed = Vec::new();

        for parent in hierarchy.top_level() {
            let children = hierarchy.children_of(&parent.id);
            if children.is_empty() {
                continue;
            }
            let ids: Vec<CriterionId> = children.iter().map(|c| c.id).collect();
            let judgments = book.by_parent.get(&parent.id).unwrap_or(&empty);
            Self::require_complete(&parent.code, &ids, judgments, options)?;

            weighed.push(SubCriteriaWeights {
                parent,
                children,
                outcome: GroupOutcome::evaluate(&ids, judgments),
            });
        }

        Ok(weighed)
    }

    fn global_weights<'a>(
        top: &GroupOutcome<CriterionId>,
        subs: &[SubCriteriaWeights<'a>],
    ) -> Vec<LeafWeight<'a>> {
        subs.iter()
            .flat_map(|sub| {
                let parent_weight = top.priorities.weight_of(&sub.parent.id).unwrap_or(0.0);
                sub.children.iter().map(move |child| LeafWeight {
                    criterion: child,
                    global_weight: parent_weight
                        * sub.outcome.priorities.weight_of(&child.id).unwrap_or(0.0),
                })
            })
            .collect()
    }

    fn score_alternatives(
        leaves: &[LeafWeight<'_>],
        alternatives: &[AlternativeId],
        book: &JudgmentBook,
        options: &AggregationOptions,
    ) -> Result<AlternativeScores, AhpError> {
        let participants = Self::participating_alternatives(alternatives, book, options);
        let empty = JudgmentSet::new();
        let mut scores = AlternativeScores::new();

        for leaf in leaves {
            let judgments = match book.by_criterion.get(&leaf.criterion.id) {
                Some(judgments) => judgments,
                // no data, no credit
                None if options.missing_judgments == MissingJudgmentPolicy::AssumeEqual => continue,
                None => &empty,
            };
            Self::require_complete(&leaf.criterion.code, &participants, judgments, options)?;

            let priorities = PriorityCalculator::compute(&participants, judgments);
            for (alternative_id, priority) in priorities.iter() {
                scores
                    .entry(alternative_id)
                    .or_default()
                    .insert(leaf.criterion.code.clone(), priority);
            }
        }

        Ok(scores)
    }

    /// Alternatives that take part in scoring. Under `AssumeEqual` an
    /// alternative compared under no criterion at all is left out.
    fn participating_alternatives(
        alternatives: &[AlternativeId],
        book: &JudgmentBook,
        options: &AggregationOptions,
    ) -> Vec<AlternativeId> {
        match options.missing_judgments {
            MissingJudgmentPolicy::Reject => alternatives.to_vec(),
            MissingJudgmentPolicy::AssumeEqual => alternatives
                .iter()
                .copied()
                .filter(|id| book.by_criterion.values().any(|set| set.mentions(*id)))
                .collect(),
        }
    }

    fn final_scores(
        leaves: &[LeafWeight<'_>],
        alternatives: &[AlternativeId],
        alternative_scores: &AlternativeScores,
    ) -> BTreeMap<AlternativeId, f64> {
        alternatives
            .iter()
            .map(|id| {
                let local = alternative_scores.get(id);
                let total = leaves
                    .iter()
                    .map(|leaf| {
                        let priority = local
                            .and_then(|scores| scores.get(&leaf.criterion.code))
                            .copied()
                            .unwrap_or(0.0);
                        leaf.global_weight * priority
                    })
                    .sum();
                (*id, total)
            })
            .collect()
    }

    fn consistency_ratios(
        top: &GroupOutcome<CriterionId>,
        subs: &[SubCriteriaWeights<'_>],
    ) -> BTreeMap<String, f64> {
        std::iter::once((LEVEL1_GROUP_LABEL.to_string(), top.consistency_ratio))
            .chain(
                subs.iter()
                    .filter(|sub| sub.children.len() >= 2)
                    .map(|sub| (sub.parent.code.clone(), sub.outcome.consistency_ratio)),
            )
            .collect()
    }

    fn require_complete<K>(
        label: &str,
        ids: &[K],
        judgments: &JudgmentSet<K>,
        options: &AggregationOptions,
    ) -> Result<(), AhpError>
    where
        K: Copy + Ord + fmt::Display,
    {
        if options.missing_judgments != MissingJudgmentPolicy::Reject {
            return Ok(());
        }
        let missing = judgments.missing_pairs(ids);
        match missing.first() {
            None => Ok(()),
            Some((a, b)) => Err(AhpError::insufficient(format!(
                "group '{}' is missing {} pairwise judgment(s), first {} vs {}",
                label,
                missing.len(),
                a,
                b
            ))),
        }
    }
}
