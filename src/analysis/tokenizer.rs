//! Space tokenizer.
//!
//! Splits text on the ASCII space character only. Runs of spaces, and leading
//! or trailing spaces, never produce empty terms. Other whitespace such as tabs
//! stays inside the term and is caught later by [`is_valid_term`].
//!
//! # Examples
//!
//! ```
//! use search_server::analysis::tokenizer::split_into_words;
//!
//! assert_eq!(split_into_words("  hello   world "), vec!["hello", "world"]);
//! assert!(split_into_words("   ").is_empty());
//! ```

/// Split `text` into space-delimited terms, borrowing from the input.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// A term is valid when it contains no control character (code point below space).
pub fn is_valid_term(term: &str) -> bool {
    !term.chars().any(|c| c < ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_into_words() {
        let words = split_into_words("pipi pupu papa popo");
        assert_eq!(words, vec!["pipi", "pupu", "papa", "popo"]);
    }

    #[test]
    fn test_split_collapses_spaces() {
        assert_eq!(split_into_words("  cat   in the  city  "), vec![
            "cat", "in", "the", "city"
        ]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_into_words("").is_empty());
        assert!(split_into_words("     ").is_empty());
    }

    #[test]
    fn test_split_only_on_space() {
        assert_eq!(split_into_words("a\tb c"), vec!["a\tb", "c"]);
    }

    #[test]
    fn test_is_valid_term() {
        assert!(is_valid_term("hello"));
        assert!(is_valid_term("-minus"));
        assert!(is_valid_term("café"));
        assert!(!is_valid_term("tab\there"));
        assert!(!is_valid_term("bell\u{7}"));
        assert!(!is_valid_term("\u{0}"));
    }
}
