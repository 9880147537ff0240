// Output formatting — terminal display and JSON export.

pub mod export;
pub mod terminal;

/// Shorten `text` to `max_chars` characters for display, marking the cut with "...".
/// Counts characters, not bytes, so page text in any script is safe to cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_chars("héllo", 5), "héllo");
    }

    #[test]
    fn test_cuts_on_char_boundary() {
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
        assert_eq!(truncate_chars("abc", 0), "...");
    }
}
