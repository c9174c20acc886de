//! Property-based tests for proof analysis using proptest.
//!
//! These tests check the invariants the pipeline promises for arbitrary input:
//!
//! - Analysis is total and indices run 1..=n
//! - Cleaning already-clean prose is the identity
//! - Classification is deterministic and honors group priority
//! - Step text is always trimmed single-line prose

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::analysis::classifier::StepClassifier;
    use crate::analysis::cleaner::clean_markup;
    use crate::analysis::lexer::tokenize;
    use crate::analysis::pipeline::analyze;
    use crate::analysis::segmenter::Segmenter;
    use crate::analysis::types::SemanticLabel;

    // Arbitrary markup-heavy text, including malformed macros and braces
    fn markup() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("\\textbf{".to_string()),
                Just("\\section{".to_string()),
                Just("}".to_string()),
                Just("{".to_string()),
                Just("$".to_string()),
                Just("\\\\".to_string()),
                Just("\n\n".to_string()),
                Just("\\frac".to_string()),
                Just("\\alpha".to_string()),
                Just("% c\n".to_string()),
                Just("\\".to_string()),
                Just(". ".to_string()),
                Just("; ".to_string()),
                "[a-zA-Z0-9 ]{0,12}",
            ],
            0..24,
        )
        .prop_map(|parts| parts.concat())
    }

    // Prose with no markup characters and collapsed whitespace
    fn clean_prose() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-zA-Z0-9=+<>(),.;:!?'^_-]{1,10}", 0..12)
            .prop_map(|words| words.join(" "))
    }

    proptest! {
        /// Analysis never panics and numbers steps 1..=n.
        #[test]
        fn indices_are_consecutive_from_one(input in markup()) {
            let steps = analyze(&input);
            for (i, step) in steps.iter().enumerate() {
                prop_assert_eq!(step.index, i + 1);
            }
        }

        /// Arbitrary unicode input is handled.
        #[test]
        fn analysis_is_total(input in any::<String>()) {
            let _ = analyze(&input);
        }

        /// Steps are non-empty, trimmed and single-line.
        #[test]
        fn step_text_is_clean(input in markup()) {
            for step in analyze(&input) {
                prop_assert!(!step.text.is_empty());
                prop_assert_eq!(step.text.trim(), step.text.as_str());
                prop_assert!(!step.text.contains('\n'));
                prop_assert!(!step.text.contains("  "));
            }
        }

        /// Cleaning already-clean prose returns it unchanged.
        #[test]
        fn cleaning_is_identity_on_prose(prose in clean_prose()) {
            prop_assert_eq!(clean_markup(&prose), prose);
        }

        /// Cleaning is idempotent on plain prose. Escaped markup characters are
        /// outside this: their cleaned form is not itself clean markup.
        #[test]
        fn cleaning_twice_equals_once(prose in clean_prose()) {
            let once = clean_markup(&prose);
            prop_assert_eq!(clean_markup(&once), once);
        }

        /// The lexer is lossless.
        #[test]
        fn lexer_reproduces_input(input in any::<String>()) {
            let joined: String = tokenize(&input).iter().map(|t| t.text).collect();
            prop_assert_eq!(joined, input);
        }

        /// Segments appear in source order.
        #[test]
        fn segments_preserve_order(input in markup()) {
            let mut cursor = 0;
            for segment in Segmenter::default().segment(&input) {
                let found = input[cursor..].find(segment.raw());
                prop_assert!(found.is_some(), "segment {:?} out of order", segment.raw());
                cursor += found.unwrap_or(0) + segment.raw().len();
            }
        }

        /// A step matching both assumption and claim keywords is an assumption.
        #[test]
        fn priority_is_deterministic(filler in "[0-9 =+]{0,20}") {
            let classifier = StepClassifier::default();
            let text = format!("suppose {} is true", filler);
            prop_assert_eq!(classifier.classify(&text), SemanticLabel::Assumption);
            prop_assert_eq!(classifier.classify(&text), classifier.classify(&text));
        }

        /// Text without any keyword is labeled other.
        #[test]
        fn keyword_free_text_is_other(text in "[0-9 =+*/<>()]{0,40}") {
            prop_assert_eq!(StepClassifier::default().classify(&text), SemanticLabel::Other);
        }
    }
}
