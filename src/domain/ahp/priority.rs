//! Priority Vector Calculator - row geometric mean method.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ComparisonMatrix, JudgmentSet};

/// Normalized weights for the entities of one comparison group.
///
/// Entries keep the order of the ids the vector was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityVector<K> {
    entries: Vec<(K, f64)>,
}

impl<K: Copy + PartialEq> PriorityVector<K> {
    pub fn ids(&self) -> Vec<K> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, w)| *w).collect()
    }

    pub fn weight_of(&self, id: &K) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == id)
            .map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

/// Derives priority weights from pairwise judgments.
pub struct PriorityCalculator;

impl PriorityCalculator {
    /// Computes the weight of every id in `ids`.
    ///
    /// # Edge Cases
    /// - No ids: empty vector
    /// - One id: `[1.0]`, the geometric mean step is skipped
    /// - No judgments at all: `1/N` for every id
    pub fn compute<K>(ids: &[K], judgments: &JudgmentSet<K>) -> PriorityVector<K>
    where
        K: Copy + Ord + fmt::Display,
    {
        match ids.len() {
            0 => PriorityVector {
                entries: Vec::new(),
            },
            1 => PriorityVector {
                entries: vec![(ids[0], 1.0)],
            },
            _ => {
                let matrix = ComparisonMatrix::build(ids, judgments);
                Self::from_matrix(ids, &matrix)
            }
        }
    }

    /// Normalized row geometric means of `matrix`, labelled with `ids`.
    pub fn from_matrix<K: Copy>(ids: &[K], matrix: &ComparisonMatrix) -> PriorityVector<K> {
        let n = matrix.size();
        let geo: Vec<f64> = (0..n)
            .map(|i| matrix.row(i).iter().product::<f64>().powf(1.0 / n as f64))
            .collect();

        let sum: f64 = geo.iter().sum();
        let divisor = if sum == 0.0 { 1.0 } else { sum };

        PriorityVector {
            entries: ids
                .iter()
                .zip(geo)
                .map(|(id, g)| (*id, g / divisor))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::JudgmentValue;

    fn v(value: f64) -> JudgmentValue {
        JudgmentValue::new(value).unwrap()
    }

    #[test]
    fn single_entity_gets_full_weight() {
        let weights = PriorityCalculator::compute(&[42u32], &JudgmentSet::new());
        assert_eq!(weights.weights(), vec![1.0]);
    }

    #[test]
    fn empty_group_yields_empty_vector() {
        let weights = PriorityCalculator::compute::<u32>(&[], &JudgmentSet::new());
        assert!(weights.is_empty());
    }

    #[test]
    fn two_entities_split_by_judgment() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, v(2.0)).unwrap();

        let weights = PriorityCalculator::compute(&[1, 2], &set);
        assert!((weights.weight_of(&1).unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((weights.weight_of(&2).unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn missing_judgments_mean_equal_weights() {
        let weights = PriorityCalculator::compute(&[1u32, 2, 3, 4], &JudgmentSet::new());
        for w in weights.weights() {
            assert!((w - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn three_criteria_geometric_mean() {
        // Cost:Time = 3, Cost:Quality = 5, Time:Quality = 2
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, v(3.0)).unwrap();
        set.insert(1, 3, v(5.0)).unwrap();
        set.insert(2, 3, v(2.0)).unwrap();

        let weights = PriorityCalculator::compute(&[1, 2, 3], &set).weights();
        assert!((weights[0] - 0.6483).abs() < 1e-4);
        assert!((weights[1] - 0.2297).abs() < 1e-4);
        assert!((weights[2] - 0.1220).abs() < 1e-4);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn weights_follow_requested_id_order() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, v(4.0)).unwrap();

        let weights = PriorityCalculator::compute(&[2, 1], &set);
        assert_eq!(weights.ids(), vec![2, 1]);
        assert!((weights.weights()[1] - 0.8).abs() < 1e-12);
    }
}
