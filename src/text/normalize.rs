// Text normalizer — main content, markup stripped, whitespace collapsed, lowercased.
//
// The output of `normalize` is the canonical form every later stage works
// on: TF-IDF tokenization, character-level span matching, and the word diff.
// Running `normalize` on its own output returns it unchanged: text that is
// already collapsed, lowercase, and free of complete tags is taken as plain
// text and passed through without being parsed again, so decoded `<` or a
// literal `&amp;` survives a second pass.

use std::sync::OnceLock;

use regex_lite::Regex;
use thiserror::Error;

use super::extract::main_content;

/// Errors that can occur during normalization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("no readable text could be extracted from the document")]
    NoText,
}

/// A complete tag, comment opener, or doctype.
fn markup() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<(?:!--|!doctype|/?[a-z][a-z0-9-]*(?:[\s/][^<>]*)?>)")
            .expect("markup pattern is valid")
    })
}

/// True for text already in normalized form.
pub fn is_normalized(text: &str) -> bool {
    !text.is_empty()
        && collapse_whitespace(text) == text
        && text.to_lowercase() == text
        && !markup().is_match(text)
}

/// Turn raw HTML into normalized, comparable text.
pub fn normalize(html: &str) -> Result<String, NormalizeError> {
    if is_normalized(html) {
        return Ok(html.to_string());
    }
    let text = collapse_whitespace(&main_content(html)).to_lowercase();
    if text.is_empty() {
        return Err(NormalizeError::NoText);
    }
    Ok(text)
}

/// Normalize raw bytes, replacing invalid UTF-8 sequences.
pub fn normalize_bytes(bytes: &[u8]) -> Result<String, NormalizeError> {
    normalize(&String::from_utf8_lossy(bytes))
}

/// Collapses repeated whitespace, trims edges, and turns newlines/tabs into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
