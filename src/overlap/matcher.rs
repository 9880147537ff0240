// Sequence matcher — recursive longest-common-block alignment.
//
// Finds the longest contiguous run common to both sequences, then recurses
// on the pieces to its left and right. The resulting blocks never overlap
// and are ordered in both sequences. This is a heuristic: it does not
// promise a globally optimal LCS, but it runs in roughly linear-to-quadratic
// time and finds the blocks a human would point at.
//
// Auto-junk: when `b` has 200 or more elements, any element occurring in
// more than 1% of `b` (plus one) is "popular" and cannot seed a match. For
// character sequences this removes spaces and the commonest letters from
// the index, which keeps long documents fast. Popular elements can still be
// absorbed at the edges of a match once one is found.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Sequences shorter than this are never auto-junked.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A common block: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// How to turn a range of `a` into the matching range of `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// One edit step: `a[a_start..a_end]` relates to `b[b_start..b_end]` by `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opcode {
    pub tag: OpTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    /// Positions in `b` of every non-popular element
    b2j: HashMap<&'a T, Vec<usize>>,
    blocks: OnceCell<Vec<Match>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    /// Index `b` for matching against `a`, with auto-junk applied.
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }

        Self {
            a,
            b,
            b2j,
            blocks: OnceCell::new(),
        }
    }

    /// Longest block common to `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks, the one starting earliest in `a` wins, and
    /// of those the one starting earliest in `b`. Returns a zero-size match
    /// at `(alo, blo)` when nothing is shared.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the longest match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        // Grow the block over popular elements that the index skipped.
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi && bestj + bestsize < bhi && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }

    /// Non-overlapping common blocks, ascending in both sequences, with
    /// adjacent blocks merged. Zero-size blocks are never returned.
    pub fn matching_blocks(&self) -> &[Match] {
        self.blocks.get_or_init(|| self.compute_matching_blocks())
    }

    fn compute_matching_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            found.push(m);
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        found.sort();

        let mut merged: Vec<Match> = Vec::with_capacity(found.len());
        for m in found {
            if let Some(last) = merged.last_mut() {
                if last.a + last.size == m.a && last.b + last.size == m.b {
                    last.size += m.size;
                    continue;
                }
            }
            merged.push(m);
        }
        merged
    }

    /// Edit steps that turn `a` into `b`, covering both sequences end to end.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let sentinel = Match {
            a: self.a.len(),
            b: self.b.len(),
            size: 0,
        };
        let (mut i, mut j) = (0, 0);
        let mut codes = Vec::new();

        for m in self.matching_blocks().iter().chain(std::iter::once(&sentinel)) {
            let tag = match (i < m.a, j < m.b) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                codes.push(Opcode {
                    tag,
                    a_start: i,
                    a_end: m.a,
                    b_start: j,
                    b_end: m.b,
                });
            }
            i = m.a + m.size;
            j = m.b + m.size;
            if m.size > 0 {
                codes.push(Opcode {
                    tag: OpTag::Equal,
                    a_start: m.a,
                    a_end: i,
                    b_start: m.b,
                    b_end: j,
                });
            }
        }
        codes
    }

    /// Opcodes split into hunks, each change surrounded by at most `context`
    /// unchanged elements. Identical inputs produce no hunks.
    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<Opcode>> {
        let mut codes = self.opcodes();
        if codes.is_empty() {
            return Vec::new();
        }

        // Trim leading and trailing equal runs down to the context width.
        if let Some(first) = codes.first_mut() {
            if first.tag == OpTag::Equal {
                first.a_start = first.a_start.max(first.a_end.saturating_sub(context));
                first.b_start = first.b_start.max(first.b_end.saturating_sub(context));
            }
        }
        if let Some(last) = codes.last_mut() {
            if last.tag == OpTag::Equal {
                last.a_end = last.a_end.min(last.a_start + context);
                last.b_end = last.b_end.min(last.b_start + context);
            }
        }

        let mut groups = Vec::new();
        let mut group = Vec::new();
        for mut code in codes {
            // Split long equal runs: close this hunk, open the next.
            if code.tag == OpTag::Equal && code.a_end - code.a_start > 2 * context {
                group.push(Opcode {
                    tag: OpTag::Equal,
                    a_start: code.a_start,
                    a_end: code.a_end.min(code.a_start + context),
                    b_start: code.b_start,
                    b_end: code.b_end.min(code.b_start + context),
                });
                groups.push(std::mem::take(&mut group));
                code.a_start = code.a_start.max(code.a_end - context);
                code.b_start = code.b_start.max(code.b_end - context);
            }
            group.push(code);
        }
        if !group.is_empty() && !(group.len() == 1 && group[0].tag == OpTag::Equal) {
            groups.push(group);
        }
        groups
    }

    /// Similarity as `2 * matched / (len(a) + len(b))`; 1.0 for two empty inputs.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matched as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let sm = SequenceMatcher::new(&a, &b);
        assert_eq!(
            sm.find_longest_match(0, a.len(), 0, b.len()),
            Match { a: 0, b: 4, size: 5 }
        );
    }

    #[test]
    fn test_matching_blocks() {
        let a = chars("abxcd");
        let b = chars("abcd");
        let sm = SequenceMatcher::new(&a, &b);
        assert_eq!(
            sm.matching_blocks(),
            &[Match { a: 0, b: 0, size: 2 }, Match { a: 3, b: 2, size: 2 }]
        );
    }

    #[test]
    fn test_opcodes_cover_both_sequences() {
        let a = chars("qabxcd");
        let b = chars("abycdf");
        let sm = SequenceMatcher::new(&a, &b);
        let tags: Vec<(OpTag, usize, usize, usize, usize)> = sm
            .opcodes()
            .iter()
            .map(|o| (o.tag, o.a_start, o.a_end, o.b_start, o.b_end))
            .collect();
        assert_eq!(
            tags,
            vec![
                (OpTag::Delete, 0, 1, 0, 0),
                (OpTag::Equal, 1, 3, 0, 2),
                (OpTag::Replace, 3, 4, 2, 3),
                (OpTag::Equal, 4, 6, 3, 5),
                (OpTag::Insert, 6, 6, 5, 6),
            ]
        );
    }

    #[test]
    fn test_ratio() {
        let a = chars("abcd");
        let b = chars("bcde");
        let sm = SequenceMatcher::new(&a, &b);
        assert!((sm.ratio() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_grouped_opcodes_trim_context() {
        let a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        b[10] = 99;
        let sm = SequenceMatcher::new(&a, &b);
        let groups = sm.grouped_opcodes(2);
        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.first().map(|o| (o.tag, o.a_start, o.a_end)), Some((OpTag::Equal, 8, 10)));
        assert_eq!(g[1].tag, OpTag::Replace);
        assert_eq!(g.last().map(|o| (o.tag, o.a_start, o.a_end)), Some((OpTag::Equal, 11, 13)));
    }

    #[test]
    fn test_identical_has_no_hunks() {
        let a = chars("same text");
        let sm = SequenceMatcher::new(&a, &a);
        assert!(sm.grouped_opcodes(2).is_empty());
    }

    #[test]
    fn test_autojunk_still_matches_long_identical_text() {
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let a = chars(&text);
        let sm = SequenceMatcher::new(&a, &a);
        assert_eq!(sm.matching_blocks(), &[Match { a: 0, b: 0, size: a.len() }]);
    }
}
