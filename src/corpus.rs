// Documents and the ordered corpus they form.
//
// A document is normalized exactly once, when it is created. If the raw
// input cannot be turned into text, the document keeps its slot in the
// corpus with an empty placeholder text and a Degraded status, so one bad
// page never shifts the matrix indices of the others.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::similarity::SimilarityError;
use crate::text::normalize;

/// Whether a document's text came from real content or is a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Ok,
    /// Loading or normalization failed; `text` is empty.
    Degraded { reason: String },
}

/// One input page: its identifier and its normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Source URL, file path, or any caller-chosen label
    pub id: String,
    /// Lowercased, whitespace-collapsed main-content text
    pub text: String,
    pub status: DocumentStatus,
}

impl Document {
    /// Normalize raw HTML into a document. Never fails: unparsable input
    /// becomes a degraded document with empty text.
    pub fn from_html(id: impl Into<String>, html: &str) -> Self {
        let id = id.into();
        match normalize(html) {
            Ok(text) => Self {
                id,
                text,
                status: DocumentStatus::Ok,
            },
            Err(e) => {
                warn!(document = %id, error = %e, "Normalization failed, using empty placeholder");
                Self::degraded(id, e.to_string())
            }
        }
    }

    /// Wrap text that is already normalized (e.g. retained from an earlier run).
    pub fn from_normalized(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            status: DocumentStatus::Ok,
        }
    }

    /// A placeholder for a document whose content could not be obtained.
    pub fn degraded(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            status: DocumentStatus::Degraded {
                reason: reason.into(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, DocumentStatus::Degraded { .. })
    }
}

/// Ordered sequence of documents. Position defines matrix row/column index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Normalized texts in corpus order, placeholders included.
    pub fn texts(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.text.as_str()).collect()
    }

    /// Check the corpus is large enough to compare.
    pub fn ensure_comparable(&self) -> Result<(), SimilarityError> {
        if self.documents.len() < 2 {
            return Err(SimilarityError::EmptyCorpus {
                found: self.documents.len(),
            });
        }
        Ok(())
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html_normalizes() {
        let doc = Document::from_html("a", "<p>Hello   <b>World</b></p>");
        assert_eq!(doc.text, "hello world");
        assert_eq!(doc.status, DocumentStatus::Ok);
    }

    #[test]
    fn test_unparsable_html_degrades() {
        let doc = Document::from_html("bad", "<script>var x = 1;</script>");
        assert!(doc.is_degraded());
        assert!(doc.text.is_empty());
    }

    #[test]
    fn test_corpus_needs_two_documents() {
        let corpus: Corpus = vec![Document::from_normalized("a", "text")]
            .into_iter()
            .collect();
        assert!(matches!(
            corpus.ensure_comparable(),
            Err(SimilarityError::EmptyCorpus { found: 1 })
        ));
    }

    #[test]
    fn test_degraded_documents_keep_their_slot() {
        let corpus = Corpus::new(vec![
            Document::from_normalized("a", "alpha"),
            Document::degraded("b", "HTTP 404"),
            Document::from_normalized("c", "gamma"),
        ]);
        assert_eq!(corpus.texts(), vec!["alpha", "", "gamma"]);
        assert!(corpus.ensure_comparable().is_ok());
    }
}
