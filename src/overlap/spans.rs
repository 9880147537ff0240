// Overlap extractor — character-level duplicated spans between two texts.
//
// Spans are the matching blocks of a character-level sequence match,
// filtered to those strictly longer than `min_length`. Short shared runs
// (a common word, a stray phrase) are noise. Offsets and lengths count
// characters, not bytes.

use serde::{Deserialize, Serialize};

use super::matcher::SequenceMatcher;

/// Default minimum span length in characters. Spans must be strictly longer.
pub const DEFAULT_MIN_SPAN_CHARS: usize = 50;

/// A run of characters shared by both texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSpan {
    /// Character offset in the first text
    pub a_start: usize,
    /// Character offset in the second text
    pub b_start: usize,
    /// Length in characters
    pub len: usize,
    /// The shared characters, untrimmed
    pub text: String,
}

/// Find duplicated spans longer than `min_length`, ordered by position in `text_a`.
pub fn extract_spans(text_a: &str, text_b: &str, min_length: usize) -> Vec<MatchedSpan> {
    let a: Vec<char> = text_a.chars().collect();
    let b: Vec<char> = text_b.chars().collect();
    let matcher = SequenceMatcher::new(&a, &b);

    matcher
        .matching_blocks()
        .iter()
        .filter(|m| m.size > min_length)
        .map(|m| MatchedSpan {
            a_start: m.a,
            b_start: m.b,
            len: m.size,
            text: a[m.a..m.a + m.size].iter().collect(),
        })
        .collect()
}

/// Span texts trimmed for display, empty ones dropped.
pub fn span_texts(spans: &[MatchedSpan]) -> Vec<String> {
    spans
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a pair's spans into one evidence string.
pub fn stitch_evidence(spans: &[MatchedSpan]) -> String {
    span_texts(spans).join(" ")
}
