// Colored terminal output for the similarity matrix, duplicate pairs, and diffs.
//
// This module handles all terminal-specific formatting. The main.rs
// subcommands delegate here.

use colored::Colorize;

use crate::overlap::{DiffRow, OpTag, WordDiff};
use crate::pipeline::{ComparisonReport, DocumentWarning, PairReport, WarningKind};

/// Width of each side of the word diff.
const DIFF_COLUMN_WIDTH: usize = 30;

/// Display everything in a report: documents, matrix, warnings, pairs.
pub fn display_report(report: &ComparisonReport, show_diff: bool) {
    display_documents(&report.document_ids);
    display_matrix(report);
    display_warnings(&report.warnings);
    display_pairs(report, show_diff);
}

/// Document legend: short labels used as matrix headers.
pub fn display_documents(ids: &[String]) {
    println!("\n{}", format!("=== Documents ({}) ===", ids.len()).bold());
    for (i, id) in ids.iter().enumerate() {
        println!("  {:>4}  {}", label(i).dimmed(), super::truncate_chars(id, 100));
    }
}

fn label(index: usize) -> String {
    format!("D{}", index + 1)
}

/// Display the similarity matrix with heat coloring.
pub fn display_matrix(report: &ComparisonReport) {
    let n = report.matrix.size();
    println!("\n{}", "=== Similarity Matrix ===".bold());
    println!();

    let header: String = (0..n).map(|j| format!("{:>7}", label(j))).collect();
    println!("  {:>5}{}", "", header.dimmed());

    for (i, row) in report.matrix.rows().enumerate() {
        let cells: String = row
            .iter()
            .enumerate()
            .map(|(j, &score)| {
                let cell = format!("{score:>7.3}");
                if i == j {
                    cell.dimmed().to_string()
                } else {
                    colorize_score(&cell, score, report.settings.threshold).to_string()
                }
            })
            .collect();
        println!("  {:>5}{}", label(i).dimmed(), cells);
    }
}

/// Color a score by how close it is to the reporting threshold.
fn colorize_score(text: &str, score: f64, threshold: f64) -> colored::ColoredString {
    if score >= threshold {
        text.red().bold()
    } else if score >= threshold * 0.75 {
        text.bright_red()
    } else if score >= threshold * 0.5 {
        text.yellow()
    } else {
        text.normal()
    }
}

/// Display documents whose rows are placeholders.
pub fn display_warnings(warnings: &[DocumentWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    for w in warnings {
        let detail = match &w.kind {
            WarningKind::Unparsable { reason } => format!("unreadable ({reason})"),
            WarningKind::DegenerateVector => "no comparable words".to_string(),
        };
        println!(
            "  {} {} {}: {}",
            "!".yellow(),
            label(w.index),
            super::truncate_chars(&w.id, 60),
            detail.dimmed()
        );
    }
}

/// Display every reported pair with its duplicated content.
pub fn display_pairs(report: &ComparisonReport, show_diff: bool) {
    println!(
        "\n{}",
        format!(
            "=== Pairs with Similarity >= {} ({}) ===",
            report.settings.threshold,
            report.pairs.len()
        )
        .bold()
    );

    if report.pairs.is_empty() {
        println!("  No near-duplicate pairs found.");
        return;
    }

    for pair in &report.pairs {
        display_pair(pair, report.settings.min_span_chars);
        if show_diff {
            display_diff(&pair.diff);
        }
    }
}

fn display_pair(pair: &PairReport, min_span_chars: usize) {
    println!();
    println!(
        "  {} {} <-> {} {}",
        format!("{:.4}", pair.pair.score).red().bold(),
        pair.url_a,
        pair.url_b,
        format!("({} <-> {})", label(pair.pair.i), label(pair.pair.j)).dimmed(),
    );

    if pair.spans.is_empty() {
        println!(
            "    {}",
            format!("no shared passage longer than {min_span_chars} characters").dimmed()
        );
        return;
    }

    let total: usize = pair.spans.iter().map(|s| s.len).sum();
    println!(
        "    {} duplicated spans, {} characters:",
        pair.spans.len(),
        total
    );
    for span in &pair.spans {
        println!(
            "    @{:<6} \"{}\"",
            span.a_start,
            super::truncate_chars(span.text.trim(), 140).dimmed()
        );
    }
}

/// Display a word diff side by side.
pub fn display_diff(diff: &WordDiff) {
    if diff.is_identical() {
        println!("    {}", "(identical wording)".dimmed());
        return;
    }
    for hunk in &diff.hunks {
        println!(
            "    {}",
            format!("@@ word {} / word {} @@", hunk.a_start + 1, hunk.b_start + 1).cyan()
        );
        for row in &hunk.rows {
            println!("    {}", format_row(row));
        }
    }
}

fn format_row(row: &DiffRow) -> String {
    let side = |word: &Option<String>| {
        let w = word.as_deref().unwrap_or("");
        format!(
            "{:<width$}",
            super::truncate_chars(w, DIFF_COLUMN_WIDTH - 3),
            width = DIFF_COLUMN_WIDTH
        )
    };
    let (left, right) = (side(&row.left), side(&row.right));
    match row.tag {
        OpTag::Equal => format!("  {left} | {right}"),
        OpTag::Delete => format!("{} {} | {right}", "-".red(), left.red()),
        OpTag::Insert => format!("{} {left} | {}", "+".green(), right.green()),
        OpTag::Replace => format!("{} {} | {}", "~".yellow(), left.red(), right.green()),
    }
}
