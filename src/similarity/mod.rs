// Similarity engine — TF-IDF vectors and the all-pairs cosine matrix.

pub mod matrix;
pub mod tfidf;
pub mod tokenize;
pub mod traits;

use thiserror::Error;

pub use matrix::SimilarityMatrix;
pub use traits::{SimilarityEngine, SimilarityOutcome, TfIdfEngine};

/// Corpus-level failures. Per-document problems never show up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("at least 2 documents are required for comparison, got {found}")]
    EmptyCorpus { found: usize },
    #[error("invalid similarity matrix: {0}")]
    InvalidMatrix(String),
}

/// Compute the TF-IDF cosine similarity matrix for a corpus of normalized texts.
pub fn similarity_matrix(texts: &[&str]) -> Result<SimilarityMatrix, SimilarityError> {
    TfIdfEngine::default().compare(texts).map(|o| o.matrix)
}
