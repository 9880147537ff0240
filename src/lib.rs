// Dupecheck: near-duplicate content detection across web pages
//
// This is the library root. Each module corresponds to a stage of the
// comparison pipeline:
//
//   raw HTML -> text -> similarity matrix -> pairs -> overlap evidence
//
// `fetch` and `output` are the thin I/O layers around that core.

pub mod corpus;
pub mod fetch;
pub mod output;
pub mod overlap;
pub mod pairs;
pub mod pipeline;
pub mod similarity;
pub mod text;

pub use corpus::{Corpus, Document, DocumentStatus};
pub use overlap::{extract_spans, MatchedSpan};
pub use pairs::{select_pairs, CandidatePair};
pub use pipeline::{CompareSettings, ComparisonError, ComparisonReport};
pub use similarity::{similarity_matrix, SimilarityError, SimilarityMatrix};
pub use text::{normalize, NormalizeError};
