// Word-level diff view for side-by-side display.
//
// Independent of the character-level spans: this tokenizes on whitespace
// and lays the two texts out row by row, one word per side, keeping only
// `context` unchanged words around each change.

use serde::{Deserialize, Serialize};

use super::matcher::{OpTag, Opcode, SequenceMatcher};

/// Unchanged words shown on each side of a change.
pub const DEFAULT_DIFF_CONTEXT: usize = 2;

/// One side-by-side row. A missing side means the word exists only on the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    pub tag: OpTag,
    pub left: Option<String>,
    pub right: Option<String>,
}

/// A contiguous region of change plus its context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    /// Word index of the hunk's first row in the first text
    pub a_start: usize,
    /// Word index of the hunk's first row in the second text
    pub b_start: usize,
    pub rows: Vec<DiffRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDiff {
    pub hunks: Vec<DiffHunk>,
}

impl WordDiff {
    /// True when the texts have the same words.
    pub fn is_identical(&self) -> bool {
        self.hunks.is_empty()
    }
}

fn rows_for(code: &Opcode, a: &[&str], b: &[&str]) -> Vec<DiffRow> {
    let left = &a[code.a_start..code.a_end];
    let right = &b[code.b_start..code.b_end];
    let height = left.len().max(right.len());
    (0..height)
        .map(|k| DiffRow {
            tag: code.tag,
            left: left.get(k).map(|w| w.to_string()),
            right: right.get(k).map(|w| w.to_string()),
        })
        .collect()
}

/// Diff two texts word by word.
pub fn word_diff(text_a: &str, text_b: &str, context: usize) -> WordDiff {
    let a: Vec<&str> = text_a.split_whitespace().collect();
    let b: Vec<&str> = text_b.split_whitespace().collect();
    let matcher = SequenceMatcher::new(&a, &b);

    let hunks = matcher
        .grouped_opcodes(context)
        .into_iter()
        .filter_map(|group| {
            let first = group.first()?;
            Some(DiffHunk {
                a_start: first.a_start,
                b_start: first.b_start,
                rows: group.iter().flat_map(|code| rows_for(code, &a, &b)).collect(),
            })
        })
        .collect();

    WordDiff { hunks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts() {
        assert!(word_diff("one two three", "one  two\nthree", 2).is_identical());
    }

    #[test]
    fn test_replacement_with_context() {
        let d = word_diff("a b c d e f g", "a b c X e f g", 1);
        assert_eq!(d.hunks.len(), 1);
        let rows: Vec<(OpTag, Option<&str>, Option<&str>)> = d.hunks[0]
            .rows
            .iter()
            .map(|r| (r.tag, r.left.as_deref(), r.right.as_deref()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (OpTag::Equal, Some("c"), Some("c")),
                (OpTag::Replace, Some("d"), Some("X")),
                (OpTag::Equal, Some("e"), Some("e")),
            ]
        );
        assert_eq!(d.hunks[0].a_start, 2);
    }

    #[test]
    fn test_uneven_replace_pads_shorter_side() {
        let d = word_diff("keep old words keep", "keep new keep", 0);
        let rows = &d.hunks[0].rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].left.as_deref(), Some("words"));
        assert_eq!(rows[1].right, None);
    }

    #[test]
    fn test_distant_changes_split_into_hunks() {
        let a = "x 1 2 3 4 5 6 7 8 y";
        let b = "X 1 2 3 4 5 6 7 8 Y";
        assert_eq!(word_diff(a, b, 2).hunks.len(), 2);
    }
}
