use once_cell::sync::Lazy;
use regex::Regex;

use crate::ranking::stop_words::is_stop_word;

// Two or more word characters between word boundaries.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Lowercases `text` and returns its tokens in order, stop words removed.
/// Repeated tokens are kept; term counts depend on them.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            tokenize("Data Analyst: SQL/Python, Tableau."),
            vec!["data", "analyst", "sql", "python", "tableau"]
        );
    }

    #[test]
    fn test_single_character_tokens_dropped() {
        assert_eq!(tokenize("C R Go x86"), vec!["x86"]);
    }

    #[test]
    fn test_stop_words_removed() {
        assert_eq!(tokenize("the chef and the kitchen"), vec!["chef", "kitchen"]);
    }

    #[test]
    fn test_repeated_tokens_kept() {
        assert_eq!(tokenize("data data data"), vec!["data", "data", "data"]);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tokenize("Résumé café"), vec!["résumé", "café"]);
    }

    #[test]
    fn test_only_stop_words_is_empty() {
        assert!(tokenize("the and of with").is_empty());
        assert!(tokenize("").is_empty());
    }
}
