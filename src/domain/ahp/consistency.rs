//! Consistency Evaluator - Saaty consistency ratio.

use std::fmt;

use super::{ComparisonMatrix, JudgmentSet};

/// Saaty's random index for matrix sizes 1 through 10.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Random index used for matrices larger than the table.
pub const RANDOM_INDEX_FALLBACK: f64 = 1.49;

/// Conventional upper bound for an acceptable consistency ratio.
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Random index for an `n` x `n` matrix.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        1..=10 => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX_FALLBACK,
    }
}

/// Measures how consistent a set of judgments is with its priority vector.
///
/// The ratio is diagnostic only; nothing here rejects a high value.
pub struct ConsistencyEvaluator;

impl ConsistencyEvaluator {
    /// Consistency ratio of the judgments over `ids` given `weights`, which
    /// must be ordered like `ids`.
    ///
    /// Always 0 for two or fewer entities.
    pub fn consistency_ratio<K>(ids: &[K], judgments: &JudgmentSet<K>, weights: &[f64]) -> f64
    where
        K: Copy + Ord + fmt::Display,
    {
        if ids.len() <= 2 {
            return 0.0;
        }
        let matrix = ComparisonMatrix::build(ids, judgments);
        Self::from_matrix(&matrix, weights)
    }

    pub fn from_matrix(matrix: &ComparisonMatrix, weights: &[f64]) -> f64 {
        let n = matrix.size();
        if n <= 2 {
            return 0.0;
        }

        let aw = matrix.multiply(weights);
        let lambda_max = aw
            .iter()
            .zip(weights)
            .map(|(product, w)| product / w)
            .sum::<f64>()
            / n as f64;

        let ci = (lambda_max - n as f64) / (n as f64 - 1.0);
        let ri = random_index(n);
        if ri == 0.0 {
            return 0.0;
        }
        // lambda_max >= n in exact arithmetic; clamp rounding noise
        (ci / ri).max(0.0)
    }

    pub fn is_acceptable(ratio: f64, threshold: f64) -> bool {
        ratio <= threshold
    }
}
