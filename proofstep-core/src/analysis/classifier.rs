//! Rule-based labeling of atomic steps.
//!
//! Labels come from literal keyword matches checked in priority order, not
//! from any understanding of the mathematics: "so" matches inside "also",
//! and a step mentioning both "then" and "claim" is an inference.

use std::sync::Arc;

use super::patterns::PatternTable;
use super::types::SemanticLabel;

/// Assigns a [`SemanticLabel`] to each step.
#[derive(Debug, Clone)]
pub struct StepClassifier {
    patterns: Arc<PatternTable>,
}

impl Default for StepClassifier {
    fn default() -> Self {
        Self::new(PatternTable::shared_default())
    }
}

impl StepClassifier {
    pub fn new(patterns: Arc<PatternTable>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Label one step; `Other` when nothing matches.
    pub fn classify(&self, step: &str) -> SemanticLabel {
        let lower = step.to_lowercase();
        self.patterns
            .first_match(&lower)
            .unwrap_or(SemanticLabel::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(step: &str) -> SemanticLabel {
        StepClassifier::default().classify(step)
    }

    #[test]
    fn test_each_label() {
        assert_eq!(classify("Let x be a real number"), SemanticLabel::Assumption);
        assert_eq!(classify("Then x^2 is nonnegative"), SemanticLabel::Inference);
        assert_eq!(classify("Therefore the claim holds"), SemanticLabel::Conclusion);
        assert_eq!(classify("PROOF BY INDUCTION"), SemanticLabel::Induction);
        assert_eq!(classify("Base case:"), SemanticLabel::Induction);
        assert_eq!(classify("This is a contradiction"), SemanticLabel::Contradiction);
        assert_eq!(classify("Consider the case n = 0"), SemanticLabel::Case);
        assert_eq!(classify("Claim: x is even"), SemanticLabel::Claim);
        assert_eq!(classify("x = y + 1"), SemanticLabel::Other);
    }

    #[test]
    fn test_priority_resolves_overlap() {
        // "then" (inference) outranks "claim"
        assert_eq!(classify("then the claim follows"), SemanticLabel::Inference);
        // "suppose" (assumption) outranks "suppose not" (contradiction)
        assert_eq!(classify("Suppose not"), SemanticLabel::Assumption);
        // "if " (case) outranks "true" (claim)
        assert_eq!(classify("if n is even the formula is true"), SemanticLabel::Case);
    }

    #[test]
    fn test_substring_semantics() {
        // "so" inside "also"
        assert_eq!(classify("We also note x = 2"), SemanticLabel::Inference);
        // "let " needs the trailing space
        assert_eq!(classify("the outlet"), SemanticLabel::Other);
    }

    #[test]
    fn test_case_insensitive_claim_words() {
        assert_eq!(classify("The statement is True"), SemanticLabel::Claim);
        assert_eq!(classify("FALSE"), SemanticLabel::Claim);
    }

    #[test]
    fn test_deterministic() {
        let classifier = StepClassifier::default();
        let text = "Hence, by induction, the claim is true";
        let first = classifier.classify(text);
        for _ in 0..10 {
            assert_eq!(classifier.classify(text), first);
        }
        assert_eq!(first, SemanticLabel::Inference);
    }
}
