// Similarity engine trait — swap-ready abstraction.
//
// The pipeline only needs "texts in, matrix out". TF-IDF cosine is the
// default engine; anything else that produces a valid SimilarityMatrix
// (shingle Jaccard, embeddings) can be dropped in behind this trait.

use super::matrix::SimilarityMatrix;
use super::tfidf::TfIdfVectorizer;
use super::SimilarityError;

/// Result of comparing a corpus: the matrix plus the documents that had
/// nothing to compare with (all-zero vectors).
#[derive(Debug, Clone)]
pub struct SimilarityOutcome {
    pub matrix: SimilarityMatrix,
    /// Indices of documents scored 0 against every other document
    pub degenerate: Vec<usize>,
}

/// Trait for computing an all-pairs similarity matrix over normalized texts.
pub trait SimilarityEngine {
    /// Compare every text against every other. Fails only when there are
    /// fewer than two texts.
    fn compare(&self, texts: &[&str]) -> Result<SimilarityOutcome, SimilarityError>;
}

/// TF-IDF cosine similarity engine — the default.
#[derive(Default)]
pub struct TfIdfEngine {
    pub vectorizer: TfIdfVectorizer,
}

impl SimilarityEngine for TfIdfEngine {
    fn compare(&self, texts: &[&str]) -> Result<SimilarityOutcome, SimilarityError> {
        if texts.len() < 2 {
            return Err(SimilarityError::EmptyCorpus { found: texts.len() });
        }
        let model = self.vectorizer.fit_transform(texts);
        Ok(SimilarityOutcome {
            matrix: SimilarityMatrix::from_vectors(&model.vectors),
            degenerate: model.degenerate_documents(),
        })
    }
}
