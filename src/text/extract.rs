// Density-based main-content extraction.
//
// Every block-level container (article, main, section, div, td) is a
// candidate. The tree is walked once, without recursion, with boilerplate
// descendants removed (nav, header, footer, scripts, and anything whose class or id
// looks like a menu, banner, or ad slot). Candidates are scored by how much
// non-link text they carry:
//
//   score = text_chars - 2 * link_chars (+ bonus for article/main)
//
// and the best-scoring candidate wins. Pages without any qualifying
// candidate fall back to the whole body, and pages whose only text lives in
// boilerplate fall back to every text node outside scripts and styles.

use std::sync::OnceLock;

use regex_lite::Regex;
use scraper::{ElementRef, Html, Node};

/// Containers considered as the page's main content (plus anything with role="main").
const CANDIDATE_TAGS: &[&str] = &["article", "main", "section", "div", "td"];

/// Candidates with less text than this are ignored.
const MIN_CANDIDATE_CHARS: usize = 25;

/// Elements that never contribute readable text.
const NON_CONTENT_TAGS: &[&str] = &[
    "head", "title", "script", "style", "noscript", "template", "iframe", "svg", "canvas",
    "object",
];

/// Structural boilerplate, skipped unless we are in last-resort mode.
const BOILERPLATE_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "form", "button", "select", "menu", "dialog",
];

const ARTICLE_BONUS: i64 = 500;
const MAIN_BONUS: i64 = 300;
const POSITIVE_HINT_BONUS: i64 = 100;
const LINK_HEAVY_PENALTY: i64 = 500;

fn unlikely_hint() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)nav|menu|sidebar|footer|header|banner|masthead|cookie|consent|\bads?\b|advert|sponsor|promo|subscribe|newsletter|social|share|comment|related|breadcrumb|popup|modal",
        )
        .expect("boilerplate pattern is valid")
    })
}

fn positive_hint() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)article|body|content|entry|main|post|story|text")
            .expect("content pattern is valid")
    })
}

/// How aggressively to drop elements while gathering text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    /// Drop scripts/styles and all boilerplate.
    Content,
    /// Drop scripts/styles only.
    Everything,
}

fn class_and_id(el: &scraper::node::Element) -> String {
    let mut out = String::new();
    if let Some(c) = el.attr("class") {
        out.push_str(c);
        out.push(' ');
    }
    if let Some(i) = el.attr("id") {
        out.push_str(i);
    }
    out
}

fn is_hidden(el: &scraper::node::Element) -> bool {
    el.attr("hidden").is_some()
        || el.attr("aria-hidden") == Some("true")
        || el
            .attr("style")
            .is_some_and(|s| s.replace(' ', "").contains("display:none"))
}

fn is_boilerplate(el: &scraper::node::Element) -> bool {
    if matches!(el.name(), "html" | "body") {
        return false;
    }
    if BOILERPLATE_TAGS.contains(&el.name()) || el.attr("role") == Some("navigation") {
        return true;
    }
    let hints = class_and_id(el);
    !hints.is_empty() && unlikely_hint().is_match(&hints) && !positive_hint().is_match(&hints)
}

fn is_dropped(el: &scraper::node::Element, filter: Filter) -> bool {
    if NON_CONTENT_TAGS.contains(&el.name()) || is_hidden(el) {
        return true;
    }
    filter == Filter::Content && is_boilerplate(el)
}

fn is_candidate(el: &scraper::node::Element) -> bool {
    CANDIDATE_TAGS.contains(&el.name()) || el.attr("role") == Some("main")
}

/// Score adjustments that depend only on the element itself.
fn element_bonus(el: &scraper::node::Element) -> i64 {
    let mut bonus = match el.name() {
        "article" => ARTICLE_BONUS,
        "main" => MAIN_BONUS,
        _ if el.attr("role") == Some("main") => MAIN_BONUS,
        _ => 0,
    };
    let hints = class_and_id(el);
    if !hints.is_empty() && positive_hint().is_match(&hints) {
        bonus += POSITIVE_HINT_BONUS;
    }
    bonus
}

/// A content container and the slice of the walk's fragments it covers.
#[derive(Debug)]
struct Candidate {
    first: usize,
    last: usize,
    chars: usize,
    link_chars: usize,
    bonus: i64,
}

impl Candidate {
    fn score(&self) -> i64 {
        let chars = self.chars as i64;
        let link_chars = self.link_chars as i64;
        let mut score = chars - 2 * link_chars + self.bonus;
        if link_chars > chars / 2 {
            score -= LINK_HEAVY_PENALTY;
        }
        score
    }
}

/// Text fragments in document order, plus every candidate seen on the way.
#[derive(Debug, Default)]
struct Walk<'a> {
    fragments: Vec<&'a str>,
    candidates: Vec<Candidate>,
}

impl<'a> Walk<'a> {
    fn push(&mut self, fragment: &'a str, in_link: bool, open: Option<usize>) {
        let n = fragment.chars().filter(|c| !c.is_whitespace()).count();
        if n == 0 {
            return;
        }
        self.fragments.push(fragment);
        if let Some(index) = open {
            let candidate = &mut self.candidates[index];
            candidate.chars += n;
            if in_link {
                candidate.link_chars += n;
            }
        }
    }

    fn text(&self, first: usize, last: usize) -> String {
        self.fragments[first..last].join(" ")
    }

    /// The densest candidate's text, if any candidate qualifies.
    fn best_candidate(&self) -> Option<String> {
        let mut best: Option<(i64, &Candidate)> = None;
        for candidate in &self.candidates {
            if candidate.chars < MIN_CANDIDATE_CHARS {
                continue;
            }
            let score = candidate.score();
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, c)| self.text(c.first, c.last))
    }
}

enum Step<N> {
    Enter(N, bool),
    Leave(usize),
}

/// Walk the tree under `root` without recursion, so nesting depth is bounded
/// by the heap rather than the call stack.
///
/// A candidate's counts cover only its own text until it closes; they are
/// then folded into the enclosing candidate, so every text node is counted
/// once no matter how deeply containers nest.
fn walk(root: ElementRef<'_>, filter: Filter) -> Walk<'_> {
    let mut out = Walk::default();
    let mut open: Vec<usize> = Vec::new();
    let mut stack = vec![Step::Enter(*root, false)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Leave(index) => {
                open.pop();
                let end = out.fragments.len();
                let candidate = &mut out.candidates[index];
                candidate.last = end;
                let (chars, link_chars) = (candidate.chars, candidate.link_chars);
                if let Some(&parent) = open.last() {
                    out.candidates[parent].chars += chars;
                    out.candidates[parent].link_chars += link_chars;
                }
            }
            Step::Enter(node, in_link) => match node.value() {
                Node::Text(text) => out.push(text, in_link, open.last().copied()),
                Node::Element(value) => {
                    if is_dropped(value, filter) {
                        continue;
                    }
                    if filter == Filter::Content && is_candidate(value) {
                        let index = out.candidates.len();
                        out.candidates.push(Candidate {
                            first: out.fragments.len(),
                            last: out.fragments.len(),
                            chars: 0,
                            link_chars: 0,
                            bonus: element_bonus(value),
                        });
                        open.push(index);
                        stack.push(Step::Leave(index));
                    }
                    let in_link = in_link || value.name() == "a";
                    for child in node.children().rev() {
                        stack.push(Step::Enter(child, in_link));
                    }
                }
                _ => {}
            },
        }
    }
    out
}

/// Extract the primary readable text of an HTML document.
///
/// The result is raw (not collapsed or lowercased) and may be empty when the
/// document carries no text at all.
pub fn main_content(html: &str) -> String {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let content = walk(root, Filter::Content);
    if let Some(text) = content.best_candidate() {
        return text;
    }
    if !content.fragments.is_empty() {
        return content.text(0, content.fragments.len());
    }

    let everything = walk(root, Filter::Everything);
    everything.text(0, everything.fragments.len())
}
