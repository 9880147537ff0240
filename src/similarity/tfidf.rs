// TF-IDF vectorization over a corpus-relative vocabulary.
//
// Each document is treated as one bag of terms. The vocabulary is exactly
// the set of non-stop-word terms that occur in this corpus, so vectors (and
// therefore scores) change when the corpus changes. Weighting:
//
//   tf(t, d)  = raw count of t in d
//   idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//   v_d       = tf * idf, then L2-normalized
//
// The smoothed IDF never reaches zero, so a term shared by every document
// still contributes to similarity. A document with no vocabulary terms
// (empty placeholder, or only stop words) gets an all-zero vector.

use std::collections::{BTreeMap, HashMap, HashSet};

use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::tokenize::tokenize;

/// A sparse, L2-normalized document vector keyed by vocabulary index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    /// (term index, weight), sorted by term index
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_map(map: BTreeMap<usize, f64>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// True when the document contributed no vocabulary terms.
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ti, wi) = self.entries[i];
            let (tj, wj) = other.entries[j];
            match ti.cmp(&tj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Vocabulary, IDF weights, and one vector per document for a single corpus.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    /// Terms in sorted order; a term's position is its vector index
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub vectors: Vec<SparseVector>,
}

impl TfIdfModel {
    /// Indices of documents whose vector is all zeros.
    pub fn degenerate_documents(&self) -> Vec<usize> {
        self.vectors
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_zero())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }
}

/// Builds TF-IDF models, excluding a fixed stop-word list from the vocabulary.
pub struct TfIdfVectorizer {
    stop_words: HashSet<String>,
}

impl Default for TfIdfVectorizer {
    /// English stop words from the `stop-words` crate.
    fn default() -> Self {
        Self::with_stop_words(get(LANGUAGE::English))
    }
}

impl TfIdfVectorizer {
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    fn terms(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| !self.is_stop_word(t))
            .collect()
    }

    /// Fit the vocabulary and IDF on `texts` and transform them in one pass.
    pub fn fit_transform(&self, texts: &[&str]) -> TfIdfModel {
        let n = texts.len();

        let counts: Vec<HashMap<String, usize>> = texts
            .iter()
            .map(|text| {
                let mut tf = HashMap::new();
                for term in self.terms(text) {
                    *tf.entry(term).or_insert(0usize) += 1;
                }
                tf
            })
            .collect();

        // Document frequency per term; BTreeMap gives a sorted, stable vocabulary.
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let vocabulary: Vec<String> = df.keys().map(|t| t.to_string()).collect();
        let index: HashMap<&str, usize> = df.keys().enumerate().map(|(i, t)| (*t, i)).collect();
        let idf: Vec<f64> = df
            .values()
            .map(|&d| ((1.0 + n as f64) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .iter()
            .map(|tf| {
                let mut weights: BTreeMap<usize, f64> = tf
                    .iter()
                    .filter_map(|(term, &count)| {
                        index
                            .get(term.as_str())
                            .map(|&i| (i, count as f64 * idf[i]))
                    })
                    .collect();
                let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for w in weights.values_mut() {
                        *w /= norm;
                    }
                }
                SparseVector::from_map(weights)
            })
            .collect();

        debug!(
            documents = n,
            vocabulary = vocabulary.len(),
            "Fitted TF-IDF model"
        );

        TfIdfModel {
            vocabulary,
            idf,
            vectors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfIdfVectorizer {
        TfIdfVectorizer::with_stop_words(["the", "and", "is"])
    }

    #[test]
    fn test_stop_words_excluded_from_vocabulary() {
        let model = vectorizer().fit_transform(&["the cat and the dog", "the bird is here"]);
        assert_eq!(model.vocabulary, vec!["bird", "cat", "dog", "here"]);
    }

    #[test]
    fn test_smoothed_idf() {
        let model = vectorizer().fit_transform(&["shared alpha", "shared beta"]);
        let shared = model.term_index("shared").unwrap();
        let alpha = model.term_index("alpha").unwrap();
        // df = 2 of n = 2 -> ln(3/3) + 1 = 1
        assert!((model.idf[shared] - 1.0).abs() < 1e-12);
        // df = 1 -> ln(3/2) + 1
        assert!((model.idf[alpha] - ((1.5f64).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let model = vectorizer().fit_transform(&["one two two three", "three four"]);
        for v in &model.vectors {
            assert!((v.norm() - 1.0).abs() < 1e-9);
            assert!(v.entries().windows(2).all(|w| w[0].0 < w[1].0));
        }
    }

    #[test]
    fn test_stop_word_only_document_is_degenerate() {
        let model = vectorizer().fit_transform(&["the and is", "real words", ""]);
        assert_eq!(model.degenerate_documents(), vec![0, 2]);
    }

    #[test]
    fn test_sparse_dot() {
        let a = SparseVector::from_map(BTreeMap::from([(0, 1.0), (2, 2.0), (5, 1.0)]));
        let b = SparseVector::from_map(BTreeMap::from([(2, 3.0), (4, 1.0), (5, 2.0)]));
        assert!((a.dot(&b) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_list_drops_common_words() {
        let v = TfIdfVectorizer::default();
        assert!(v.is_stop_word("the"));
        assert!(v.is_stop_word("and"));
        assert!(!v.is_stop_word("xylophone"));
    }
}
