/// Tokenizer for raw log text
///
/// Log files come in loose shapes: one outcome per line, comma separated lists
/// like `PASS,FAIL_err1,FAIL_err9`, or any mix of spaces, tabs and newlines.
/// This module turns that text into an ordered list of tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any run of commas, whitespace and the ASCII information separators
    /// (U+001C..U+001F) separates two tokens
    static ref SEPARATORS: Regex = Regex::new(r"[,\s\x1c-\x1f]+").expect("separator pattern is valid");
}

/// Split log text into non-empty, trimmed tokens.
///
/// # Arguments
///
/// * `text` - Raw log text
///
/// # Returns
///
/// Tokens in the order they appear in `text`
pub fn tokenize(text: &str) -> Vec<String> {
    SEPARATORS
        .split(text)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_and_newline_separate_tokens() {
        assert_eq!(
            tokenize("PASS,FAIL_err1\nFAIL_err9"),
            vec!["PASS", "FAIL_err1", "FAIL_err9"]
        );
    }

    #[test]
    fn test_mixed_delimiters() {
        let tokens = tokenize("  PASS ,\t,FAIL_a\r\n\n  weird , , PASS  ");
        assert_eq!(tokens, vec!["PASS", "FAIL_a", "weird", "PASS"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t, ,,\n").is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        assert_eq!(tokenize("c b a c"), vec!["c", "b", "a", "c"]);
    }

    #[test]
    fn test_information_separators_split_tokens() {
        assert_eq!(
            tokenize("PASS\x1fFAIL_a\x1cx\u{85}y"),
            vec!["PASS", "FAIL_a", "x", "y"]
        );
        assert_eq!(tokenize("\x1dFAIL_b\x1e"), vec!["FAIL_b"]);
    }
}
