// Word tokenizer for the TF-IDF vocabulary.
//
// A token is a maximal run of word characters (alphanumeric or underscore)
// at least two characters long, lowercased. Everything else delimits.
// Single-character runs ("a", the "s" in "it's") never become terms.

/// Minimum token length in characters.
pub const MIN_TOKEN_CHARS: usize = 2;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into lowercased word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_delimits() {
        assert_eq!(
            tokenize("Hello, world! It's snake_case-ish."),
            vec!["hello", "world", "it", "snake_case", "ish"]
        );
    }

    #[test]
    fn test_single_chars_dropped() {
        assert_eq!(tokenize("a b c de"), vec!["de"]);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tokenize("Café über naïve"), vec!["café", "über", "naïve"]);
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,.; ").is_empty());
    }
}
