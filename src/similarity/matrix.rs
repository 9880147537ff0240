// SimilarityMatrix — square, symmetric, all scores in [0, 1], diagonal 1.0.
//
// Built once per corpus and never mutated. Only the upper triangle is
// computed; the lower triangle is mirrored from it, so symmetry holds
// exactly rather than up to floating-point noise. It serializes as a list
// of rows and deserializes through `from_rows`, so a stored matrix is
// checked the same way as one built by hand.

use serde::{Deserialize, Serialize};

use super::tfidf::SparseVector;
use super::SimilarityError;

/// Cosine similarity of two vectors, clamped to [0, 1].
///
/// Zero vectors have no direction; their similarity to anything is 0.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct SimilarityMatrix {
    size: usize,
    /// Row-major, size * size
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute the all-pairs cosine matrix for the given vectors.
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let mut scores = vec![0.0; size * size];
        for i in 0..size {
            scores[i * size + i] = 1.0;
            for j in (i + 1)..size {
                let s = cosine(&vectors[i], &vectors[j]);
                scores[i * size + j] = s;
                scores[j * size + i] = s;
            }
        }
        Self { size, scores }
    }

    /// Build a matrix from explicit rows, checking every invariant.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SimilarityError> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(SimilarityError::InvalidMatrix(format!(
                    "row {i} has {} columns, expected {size}",
                    row.len()
                )));
            }
            for (j, &s) in row.iter().enumerate() {
                if !(0.0..=1.0).contains(&s) {
                    return Err(SimilarityError::InvalidMatrix(format!(
                        "score ({i}, {j}) = {s} is outside [0, 1]"
                    )));
                }
                if i == j && s != 1.0 {
                    return Err(SimilarityError::InvalidMatrix(format!(
                        "diagonal entry ({i}, {i}) = {s}, expected 1.0"
                    )));
                }
                if j < i && rows[j][i] != s {
                    return Err(SimilarityError::InvalidMatrix(format!(
                        "score ({i}, {j}) = {s} differs from ({j}, {i}) = {}",
                        rows[j][i]
                    )));
                }
            }
            scores.extend_from_slice(row);
        }
        Ok(Self { size, scores })
    }

    /// Number of documents (rows and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.size && j < self.size).then(|| self.scores[i * self.size + j])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.scores.chunks(self.size.max(1))
    }

    /// Iterate (i, j, score) over the strict upper triangle, i ascending then j.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size).flat_map(move |i| {
            ((i + 1)..self.size).map(move |j| (i, j, self.scores[i * self.size + j]))
        })
    }
}

impl TryFrom<Vec<Vec<f64>>> for SimilarityMatrix {
    type Error = SimilarityError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<SimilarityMatrix> for Vec<Vec<f64>> {
    fn from(matrix: SimilarityMatrix) -> Self {
        matrix.rows().map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_asymmetric() {
        let res = SimilarityMatrix::from_rows(vec![vec![1.0, 0.2], vec![0.3, 1.0]]);
        assert!(matches!(res, Err(SimilarityError::InvalidMatrix(_))));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let res = SimilarityMatrix::from_rows(vec![vec![1.0, 0.2], vec![0.2]]);
        assert!(matches!(res, Err(SimilarityError::InvalidMatrix(_))));
    }

    #[test]
    fn test_from_rows_rejects_out_of_range() {
        let res = SimilarityMatrix::from_rows(vec![vec![1.0, 1.2], vec![1.2, 1.0]]);
        assert!(matches!(res, Err(SimilarityError::InvalidMatrix(_))));
    }

    #[test]
    fn test_upper_triangle_order() {
        let m = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.1, 0.2],
            vec![0.1, 1.0, 0.3],
            vec![0.2, 0.3, 1.0],
        ])
        .unwrap();
        let cells: Vec<(usize, usize)> = m.upper_triangle().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(m.get(2, 1), Some(0.3));
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn test_serializes_as_rows() {
        let m = SimilarityMatrix::from_rows(vec![vec![1.0, 0.25], vec![0.25, 1.0]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,0.25],[0.25,1.0]]");
        let back: SimilarityMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_deserialize_checks_invariants() {
        for bad in [
            "[[1.0,0.5],[0.5]]",
            "[[1.0,0.5],[0.4,1.0]]",
            "[[0.9]]",
            r#"{"size":3,"scores":[1.0]}"#,
        ] {
            assert!(serde_json::from_str::<SimilarityMatrix>(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_empty_matrix_round_trips() {
        let m = SimilarityMatrix::from_vectors(&[]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[]");
        assert_eq!(serde_json::from_str::<SimilarityMatrix>(&json).unwrap(), m);
    }

    #[test]
    fn test_zero_vector_cosine_is_zero() {
        let zero = SparseVector::default();
        assert_eq!(cosine(&zero, &zero), 0.0);
    }
}
