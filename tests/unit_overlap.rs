// Unit tests for overlap extraction and the word diff view.
//
// Span minimality, span ordering, character offsets, and the scenarios
// for identical, disjoint, and too-short matches.

use dupecheck::overlap::{
    extract_spans, stitch_evidence, word_diff, OpTag, SequenceMatcher,
};

const SHARED: &str = "this paragraph about duplicate content appears word for word on both pages";

fn page(prefix: &str, suffix: &str) -> String {
    format!("{prefix} {SHARED} {suffix}")
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn identical_texts_yield_one_full_span() {
    let text = "the quick brown fox jumps";
    let spans = extract_spans(text, text, 10);
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].a_start, spans[0].b_start), (0, 0));
    assert_eq!(spans[0].len, text.len());
}

#[test]
fn disjoint_texts_yield_no_spans() {
    assert!(extract_spans("apple banana cherry", "xylophone zebra yak", 30).is_empty());
}

#[test]
fn ten_character_match_is_filtered() {
    let spans = extract_spans("header: abcdefghij :footer", "zzz abcdefghij yyy", 30);
    assert!(spans.is_empty());
}

// ============================================================
// Properties
// ============================================================

#[test]
fn spans_are_longer_than_minimum() {
    let a = page("intro text for page one", "closing remarks one");
    let b = page("a different opening for page two", "closing remarks two");
    for min in [0, 5, 20, 50] {
        for span in extract_spans(&a, &b, min) {
            assert!(span.len > min, "span of {} with min {min}", span.len);
        }
    }
}

#[test]
fn spans_ordered_by_position_in_first_text() {
    let second = "another shared block of reasonably long text that also repeats";
    let a = format!("xx {SHARED} one two three {second} zz");
    let b = format!("yy {SHARED} four five six {second} ww");
    let spans = extract_spans(&a, &b, 20);
    assert_eq!(spans.len(), 2);
    for w in spans.windows(2) {
        assert!(w[0].a_start < w[1].a_start);
    }
}

#[test]
fn shared_paragraph_is_found() {
    let a = page("intro text for page one", "closing remarks one");
    let b = page("a different opening for page two", "closing remarks two");
    let spans = extract_spans(&a, &b, 50);
    assert_eq!(spans.len(), 1);
    assert!(spans[0].text.contains(SHARED));
    let a_chars: Vec<char> = a.chars().collect();
    let at: String = a_chars[spans[0].a_start..spans[0].a_start + spans[0].len]
        .iter()
        .collect();
    assert_eq!(at, spans[0].text);
}

#[test]
fn evidence_is_trimmed_and_joined() {
    let a = page("intro text for page one", "closing remarks one");
    let b = page("a different opening for page two", "closing remarks two");
    let spans = extract_spans(&a, &b, 50);
    let evidence = stitch_evidence(&spans);
    assert_eq!(evidence, evidence.trim());
    assert!(evidence.contains(SHARED));
}

#[test]
fn long_documents_still_match() {
    // Past 200 characters the commonest characters stop seeding matches;
    // the numbers give the matcher rare anchors to grow from.
    let body: String = (0..40)
        .map(|i| format!("paragraph {i} explains why copied text hurts rankings. "))
        .collect();
    let a = format!("site one header {body} site one footer");
    let b = format!("another site nav {body} another footer");
    let spans = extract_spans(&a, &b, 50);
    let covered: usize = spans.iter().map(|s| s.len).sum();
    assert!(covered >= body.trim().len(), "covered only {covered} chars");
}

// ============================================================
// Word diff
// ============================================================

#[test]
fn word_diff_marks_changes() {
    let d = word_diff(
        "one two three four five six seven",
        "one two three 4 five six seven",
        2,
    );
    assert_eq!(d.hunks.len(), 1);
    let changed: Vec<_> = d.hunks[0]
        .rows
        .iter()
        .filter(|r| r.tag != OpTag::Equal)
        .collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].left.as_deref(), Some("four"));
    assert_eq!(changed[0].right.as_deref(), Some("4"));
}

#[test]
fn word_diff_is_independent_of_spacing() {
    assert!(word_diff("same words here", "same\twords\n\nhere", 2).is_identical());
}

#[test]
fn matcher_ratio_on_words() {
    let a = ["a", "b", "c", "d"];
    let b = ["a", "b", "x", "d"];
    let sm = SequenceMatcher::new(&a, &b);
    assert!((sm.ratio() - 0.75).abs() < 1e-12);
}
