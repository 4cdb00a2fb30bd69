//! Symmetric pair map for the judgments of one comparison group.

use std::collections::BTreeMap;
use std::fmt;

use super::{AhpError, JudgmentValue};

/// Judgments of one group, keyed by the ordered id pair `(smaller, larger)`.
///
/// Only one direction is ever stored; the reverse is implied as the
/// reciprocal. Self-comparisons are implicitly 1 and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgmentSet<K> {
    values: BTreeMap<(K, K), JudgmentValue>,
}

impl<K> Default for JudgmentSet<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<K> JudgmentSet<K>
where
    K: Copy + Ord + fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Records how strongly `i` is preferred over `j`.
    ///
    /// A later judgment for the same unordered pair replaces the earlier one.
    pub fn insert(&mut self, i: K, j: K, value: JudgmentValue) -> Result<(), AhpError> {
        if i == j {
            return Err(AhpError::validation(
                "judgments",
                format!("{} cannot be compared with itself", i),
            ));
        }
        if i < j {
            self.values.insert((i, j), value);
        } else {
            self.values.insert((j, i), value.reciprocal());
        }
        Ok(())
    }

    /// Preference of `a` over `b`, if a judgment was recorded.
    ///
    /// Always `Some(1.0)` when `a == b`.
    pub fn value(&self, a: K, b: K) -> Option<f64> {
        if a == b {
            return Some(1.0);
        }
        if a < b {
            self.values.get(&(a, b)).map(JudgmentValue::value)
        } else {
            self.values.get(&(b, a)).map(|v| v.reciprocal().value())
        }
    }

    pub fn contains(&self, a: K, b: K) -> bool {
        a != b && self.value(a, b).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored judgments in canonical orientation.
    pub fn pairs(&self) -> impl Iterator<Item = (K, K, JudgmentValue)> + '_ {
        self.values.iter().map(|(&(i, j), &v)| (i, j, v))
    }

    /// Whether `id` takes part in at least one stored judgment.
    pub fn mentions(&self, id: K) -> bool {
        self.values.keys().any(|&(i, j)| i == id || j == id)
    }

    /// Off-diagonal pairs of `ids` with no recorded judgment, in `ids` order.
    pub fn missing_pairs(&self, ids: &[K]) -> Vec<(K, K)> {
        let mut missing = Vec::new();
        for (index, &a) in ids.iter().enumerate() {
            for &b in &ids[index + 1..] {
                if !self.contains(a, b) {
                    missing.push((a, b));
                }
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(value: f64) -> JudgmentValue {
        JudgmentValue::new(value).unwrap()
    }

    #[test]
    fn stores_one_direction_and_implies_reciprocal() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, v(3.0)).unwrap();

        assert_eq!(set.value(1, 2), Some(3.0));
        assert!((set.value(2, 1).unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn reversed_insert_is_canonicalized() {
        let mut set = JudgmentSet::new();
        set.insert(7u32, 3, v(2.0)).unwrap();

        let pairs: Vec<_> = set.pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].0, pairs[0].1), (3, 7));
        assert!((pairs[0].2.value() - 0.5).abs() < 1e-12);
        assert_eq!(set.value(7, 3), Some(2.0));
    }

    #[test]
    fn later_insert_replaces_earlier_for_same_pair() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, v(3.0)).unwrap();
        set.insert(2, 1, v(4.0)).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.value(2, 1), Some(4.0));
    }

    #[test]
    fn self_comparison_is_rejected_but_reads_as_one() {
        let mut set = JudgmentSet::new();
        assert!(set.insert(5u32, 5, v(2.0)).is_err());
        assert_eq!(set.value(5, 5), Some(1.0));
        assert!(!set.contains(5, 5));
    }

    #[test]
    fn missing_pairs_lists_uncompared_pairs() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, v(3.0)).unwrap();

        assert_eq!(set.missing_pairs(&[1, 2, 3]), vec![(1, 3), (2, 3)]);
        assert!(set.missing_pairs(&[1, 2]).is_empty());
    }

    #[test]
    fn mentions_tracks_participation() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, v(3.0)).unwrap();

        assert!(set.mentions(1));
        assert!(set.mentions(2));
        assert!(!set.mentions(3));
    }
}
