//! Reciprocal comparison matrix reconstructed from a judgment set.

use std::fmt;

use super::JudgmentSet;

/// Dense N x N reciprocal matrix, row-major.
///
/// `A[i][i] = 1`; a pair without a judgment in either direction is 1
/// (equal preference).
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl ComparisonMatrix {
    pub fn build<K>(ids: &[K], judgments: &JudgmentSet<K>) -> Self
    where
        K: Copy + Ord + fmt::Display,
    {
        let size = ids.len();
        let mut cells = Vec::with_capacity(size * size);
        for &a in ids {
            for &b in ids {
                cells.push(judgments.value(a, b).unwrap_or(1.0));
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.size + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Matrix-vector product `A * w`.
    pub fn multiply(&self, weights: &[f64]) -> Vec<f64> {
        (0..self.size)
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(weights)
                    .map(|(a, w)| a * w)
                    .sum::<f64>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::JudgmentValue;

    #[test]
    fn fills_reciprocals_and_defaults() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, JudgmentValue::new(4.0).unwrap()).unwrap();

        let matrix = ComparisonMatrix::build(&[1, 2, 3], &set);

        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(0, 1), 4.0);
        assert_eq!(matrix.get(1, 0), 0.25);
        assert_eq!(matrix.get(0, 2), 1.0);
        assert_eq!(matrix.get(2, 1), 1.0);
    }

    #[test]
    fn follows_id_order_not_storage_order() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, JudgmentValue::new(4.0).unwrap()).unwrap();

        let matrix = ComparisonMatrix::build(&[2, 1], &set);
        assert_eq!(matrix.row(0), &[1.0, 0.25]);
        assert_eq!(matrix.row(1), &[4.0, 1.0]);
    }

    #[test]
    fn multiply_computes_weighted_rows() {
        let mut set = JudgmentSet::new();
        set.insert(1u32, 2, JudgmentValue::new(2.0).unwrap()).unwrap();

        let matrix = ComparisonMatrix::build(&[1, 2], &set);
        let product = matrix.multiply(&[2.0 / 3.0, 1.0 / 3.0]);

        assert!((product[0] - 4.0 / 3.0).abs() < 1e-12);
        assert!((product[1] - 2.0 / 3.0).abs() < 1e-12);
    }
}
