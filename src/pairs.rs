// Pair selector — which document pairs are similar enough to diff.
//
// Pure function of the matrix and the threshold. Pairs come out in
// (i ascending, j ascending) order so reports are reproducible.

use serde::{Deserialize, Serialize};

use crate::similarity::SimilarityMatrix;

/// Default similarity threshold for reporting a pair.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Two documents (by corpus index, `i < j`) whose score met the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidatePair {
    pub i: usize,
    pub j: usize,
    pub score: f64,
}

/// Keep every unordered pair with `score >= threshold`.
pub fn select_pairs(matrix: &SimilarityMatrix, threshold: f64) -> Vec<CandidatePair> {
    matrix
        .upper_triangle()
        .filter(|&(_, _, score)| score >= threshold)
        .map(|(i, j, score)| CandidatePair { i, j, score })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> SimilarityMatrix {
        SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.5, 0.85, 0.8],
            vec![0.5, 1.0, 0.1, 0.9],
            vec![0.85, 0.1, 1.0, 0.79],
            vec![0.8, 0.9, 0.79, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let pairs = select_pairs(&matrix(), 0.8);
        let ij: Vec<(usize, usize)> = pairs.iter().map(|p| (p.i, p.j)).collect();
        assert_eq!(ij, vec![(0, 2), (0, 3), (1, 3)]);
    }

    #[test]
    fn test_zero_threshold_selects_every_pair() {
        assert_eq!(select_pairs(&matrix(), 0.0).len(), 6);
    }

    #[test]
    fn test_threshold_above_one_selects_nothing() {
        assert!(select_pairs(&matrix(), 1.01).is_empty());
    }

    #[test]
    fn test_nan_threshold_selects_nothing() {
        assert!(select_pairs(&matrix(), f64::NAN).is_empty());
    }
}
