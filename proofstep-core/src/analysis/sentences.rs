//! Sentence splitting of cleaned prose.

use regex::Regex;
use std::sync::LazyLock;

/// A period or semicolon followed by whitespace or the end of the text.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.;](?:\s+|$)").expect("invalid regex"));

/// Split cleaned prose into atomic steps.
///
/// Punctuation inside tokens (`3.5`, `i.e.,`) is not a boundary. Empty pieces
/// are dropped and order is preserved.
pub fn split_sentences(prose: &str) -> Vec<String> {
    SENTENCE_BOUNDARY
        .split(prose)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_on_period_and_semicolon() {
        assert_eq!(
            split_sentences("Let x be real. Then x^2 ≥ 0; hence done."),
            vec!["Let x be real", "Then x^2 ≥ 0", "hence done"]
        );
    }

    #[test]
    fn test_inner_punctuation_kept() {
        assert_eq!(
            split_sentences("We have 3.5 > 3, i.e., the bound holds"),
            vec!["We have 3.5 > 3, i.e., the bound holds"]
        );
    }

    #[test]
    fn test_empty_pieces_dropped() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(". ; .").is_empty());
        assert_eq!(split_sentences("Done.. "), vec!["Done."]);
    }

    #[test]
    fn test_colon_is_not_a_boundary() {
        assert_eq!(split_sentences("Base case: n = 1"), vec!["Base case: n = 1"]);
    }
}
