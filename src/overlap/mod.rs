// Overlap extraction — duplicated spans and the word-level diff view.

pub mod diff;
pub mod matcher;
pub mod spans;

pub use diff::{word_diff, DiffHunk, DiffRow, WordDiff, DEFAULT_DIFF_CONTEXT};
pub use matcher::{Match, OpTag, Opcode, SequenceMatcher};
pub use spans::{extract_spans, span_texts, stitch_evidence, MatchedSpan, DEFAULT_MIN_SPAN_CHARS};
