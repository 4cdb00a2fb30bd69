//! Property tests for the priority calculator and consistency evaluator.

use platform_ahp::domain::ahp::{ConsistencyEvaluator, JudgmentSet, JudgmentValue, PriorityCalculator};
use proptest::prelude::*;

fn saaty_value() -> impl Strategy<Value = f64> {
    (1u32..=9, any::<bool>()).prop_map(|(k, invert)| {
        let k = f64::from(k);
        if invert {
            1.0 / k
        } else {
            k
        }
    })
}

/// Up to `n` entities and an arbitrary, possibly incomplete, set of
/// judgments between them.
fn judgment_group() -> impl Strategy<Value = (Vec<u32>, Vec<(u32, u32, f64)>)> {
    (1u32..=8).prop_flat_map(|n| {
        let pairs = prop::collection::vec((0..n, 0..n, saaty_value()), 0..30);
        (Just((0..n).collect::<Vec<u32>>()), pairs)
    })
}

fn build(judgments: &[(u32, u32, f64)]) -> JudgmentSet<u32> {
    let mut set = JudgmentSet::new();
    for &(i, j, value) in judgments.iter().filter(|(i, j, _)| i != j) {
        set.insert(i, j, JudgmentValue::new(value).unwrap()).unwrap();
    }
    set
}

proptest! {
    #[test]
    fn weights_are_normalized((ids, judgments) in judgment_group()) {
        let weights = PriorityCalculator::compute(&ids, &build(&judgments)).weights();

        prop_assert_eq!(weights.len(), ids.len());
        prop_assert!(weights.iter().all(|w| *w >= 0.0));
        let total: f64 = weights.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum = {}", total);
    }

    #[test]
    fn reversed_judgments_give_identical_weights((ids, judgments) in judgment_group()) {
        let reversed: Vec<(u32, u32, f64)> =
            judgments.iter().map(|&(i, j, value)| (j, i, 1.0 / value)).collect();

        let forward = PriorityCalculator::compute(&ids, &build(&judgments)).weights();
        let backward = PriorityCalculator::compute(&ids, &build(&reversed)).weights();

        for (a, b) in forward.iter().zip(&backward) {
            prop_assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn ratio_scale_judgments_are_consistent(
        true_weights in prop::collection::vec(1.0f64..9.0, 3..=8)
    ) {
        let ids: Vec<u32> = (0..true_weights.len() as u32).collect();
        let mut set = JudgmentSet::new();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let ratio = true_weights[i] / true_weights[j];
                set.insert(ids[i], ids[j], JudgmentValue::new(ratio).unwrap()).unwrap();
            }
        }

        let weights = PriorityCalculator::compute(&ids, &set).weights();
        let ratio = ConsistencyEvaluator::consistency_ratio(&ids, &set, &weights);
        prop_assert!(ratio < 1e-6, "CR = {}", ratio);

        let total: f64 = true_weights.iter().sum();
        for (w, t) in weights.iter().zip(&true_weights) {
            prop_assert!((w - t / total).abs() < 1e-9);
        }
    }

    #[test]
    fn two_entities_split_by_value(value in saaty_value()) {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, JudgmentValue::new(value).unwrap()).unwrap();

        let weights = PriorityCalculator::compute(&[1, 2], &set).weights();
        prop_assert!((weights[0] - value / (value + 1.0)).abs() < 1e-9);
        prop_assert!((weights[1] - 1.0 / (value + 1.0)).abs() < 1e-9);
        prop_assert_eq!(ConsistencyEvaluator::consistency_ratio(&[1, 2], &set, &weights), 0.0);
    }

    #[test]
    fn missing_judgments_mean_equal_preference(n in 1u32..=12) {
        let ids: Vec<u32> = (0..n).collect();
        let set = JudgmentSet::new();

        let weights = PriorityCalculator::compute(&ids, &set).weights();
        for w in &weights {
            prop_assert!((w - 1.0 / f64::from(n)).abs() < 1e-12);
        }
        prop_assert!(ConsistencyEvaluator::consistency_ratio(&ids, &set, &weights) < 1e-9);
    }
}

#[test]
fn single_entity_gets_full_weight() {
    let set = JudgmentSet::new();
    let weights = PriorityCalculator::compute(&[7u32], &set).weights();

    assert_eq!(weights, vec![1.0]);
    assert_eq!(ConsistencyEvaluator::consistency_ratio(&[7u32], &set, &weights), 0.0);
}
