// Comparison pipeline: corpus -> similarity matrix -> pairs -> evidence.
//
// Everything a presentation step needs comes back in one ComparisonReport:
// the matrix (for the table), every pair at or above the threshold with its
// duplicated spans and word diff (for review), and the per-document
// warnings (for showing which inputs were placeholders). Nothing is kept
// between runs.
//
// Failure policy: a bad document degrades to a warning and a zero row in
// the matrix; only a corpus with fewer than two documents aborts the run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::corpus::{Corpus, DocumentStatus};
use crate::overlap::{
    extract_spans, span_texts, stitch_evidence, word_diff, MatchedSpan, WordDiff,
    DEFAULT_DIFF_CONTEXT, DEFAULT_MIN_SPAN_CHARS,
};
use crate::pairs::{select_pairs, CandidatePair, DEFAULT_THRESHOLD};
use crate::similarity::{SimilarityEngine, SimilarityError, SimilarityMatrix};

/// Policy knobs for one comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompareSettings {
    /// Pairs scoring at or above this are reported (default 0.8)
    pub threshold: f64,
    /// Spans must be strictly longer than this many characters (default 50)
    pub min_span_chars: usize,
    /// Unchanged words kept around each change in the word diff (default 2)
    pub diff_context: usize,
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_span_chars: DEFAULT_MIN_SPAN_CHARS,
            diff_context: DEFAULT_DIFF_CONTEXT,
        }
    }
}

impl CompareSettings {
    pub fn validate(&self) -> Result<(), ComparisonError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ComparisonError::InvalidSettings(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComparisonError {
    #[error(transparent)]
    Similarity(#[from] SimilarityError),
    #[error("invalid comparison settings: {0}")]
    InvalidSettings(String),
}

/// Why a document's row in the matrix is not meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// Loading or normalization failed; the document compared as empty text.
    Unparsable { reason: String },
    /// No vocabulary terms (empty or only stop words); scored 0 against everything.
    DegenerateVector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentWarning {
    pub index: usize,
    pub id: String,
    #[serde(flatten)]
    pub kind: WarningKind,
}

/// Exportable record for one reported pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub url_a: String,
    pub url_b: String,
    /// Rounded to 4 decimal places
    pub similarity_score: f64,
    pub matched_spans: Vec<String>,
}

/// A reported pair with its evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairReport {
    pub pair: CandidatePair,
    pub url_a: String,
    pub url_b: String,
    /// Character-level duplicated spans, ordered by position in `url_a`'s text
    pub spans: Vec<MatchedSpan>,
    pub diff: WordDiff,
}

impl PairReport {
    /// All spans joined into a single string.
    pub fn evidence(&self) -> String {
        stitch_evidence(&self.spans)
    }

    pub fn record(&self) -> PairRecord {
        PairRecord {
            url_a: self.url_a.clone(),
            url_b: self.url_b.clone(),
            similarity_score: round4(self.pair.score),
            matched_spans: span_texts(&self.spans),
        }
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub settings: CompareSettings,
    /// Document identifiers in matrix order
    pub document_ids: Vec<String>,
    pub matrix: SimilarityMatrix,
    pub pairs: Vec<PairReport>,
    pub warnings: Vec<DocumentWarning>,
}

impl ComparisonReport {
    /// Exportable records, one per reported pair, in pair order.
    pub fn records(&self) -> Vec<PairRecord> {
        self.pairs.iter().map(PairReport::record).collect()
    }
}

/// Run the full comparison over an already-loaded corpus.
pub fn run(
    corpus: &Corpus,
    engine: &dyn SimilarityEngine,
    settings: &CompareSettings,
) -> Result<ComparisonReport, ComparisonError> {
    settings.validate()?;
    corpus.ensure_comparable()?;

    let docs = corpus.documents();
    let mut warnings: Vec<DocumentWarning> = docs
        .iter()
        .enumerate()
        .filter_map(|(index, doc)| match &doc.status {
            DocumentStatus::Degraded { reason } => Some(DocumentWarning {
                index,
                id: doc.id.clone(),
                kind: WarningKind::Unparsable {
                    reason: reason.clone(),
                },
            }),
            DocumentStatus::Ok => None,
        })
        .collect();

    let outcome = engine.compare(&corpus.texts())?;

    for &index in &outcome.degenerate {
        // Placeholders are already reported as unparsable.
        if docs[index].is_degraded() {
            continue;
        }
        warn!(document = %docs[index].id, "Document has no vocabulary terms, scoring 0 against all others");
        warnings.push(DocumentWarning {
            index,
            id: docs[index].id.clone(),
            kind: WarningKind::DegenerateVector,
        });
    }
    warnings.sort_by_key(|w| w.index);

    let candidates = select_pairs(&outcome.matrix, settings.threshold);
    info!(
        documents = docs.len(),
        pairs = candidates.len(),
        threshold = settings.threshold,
        "Similarity matrix computed"
    );

    let pairs: Vec<PairReport> = candidates
        .into_iter()
        .map(|pair| {
            let (a, b) = (&docs[pair.i], &docs[pair.j]);
            let spans = extract_spans(&a.text, &b.text, settings.min_span_chars);
            info!(
                url_a = %a.id,
                url_b = %b.id,
                score = pair.score,
                spans = spans.len(),
                "Extracted duplicated spans"
            );
            PairReport {
                pair,
                url_a: a.id.clone(),
                url_b: b.id.clone(),
                spans,
                diff: word_diff(&a.text, &b.text, settings.diff_context),
            }
        })
        .collect();

    Ok(ComparisonReport {
        generated_at: Utc::now(),
        settings: *settings,
        document_ids: docs.iter().map(|d| d.id.clone()).collect(),
        matrix: outcome.matrix,
        pairs,
        warnings,
    })
}
