//! Proof segmentation and step classification.
//!
//! Proof text written in LaTeX-like markup goes through four stages:
//!
//! 1. **Segmenter**: splits the markup at section markers (`\textbf{...}`,
//!    `\section{...}`), blank lines and `\\` line breaks
//! 2. **Cleaner**: renders each fragment to single-line prose, keeping math
//! 3. **Sentence splitter**: splits prose at `.`/`;` boundaries
//! 4. **Classifier**: labels each step with the first matching group of the
//!    [`PatternTable`]
//!
//! The result is an ordered, 1-indexed sequence of [`Step`]s.
//!
//! ## Example
//!
//! ```rust
//! use proofstep_core::analysis::{analyze, SemanticLabel};
//!
//! let steps = analyze("Let $x > 0$. Then $x^2 > 0$.");
//! assert_eq!(steps.len(), 2);
//! assert_eq!(steps[0].label, SemanticLabel::Assumption);
//! assert_eq!(steps[1].text, "Then x^2 > 0");
//! ```
//!
//! Analysis never fails on text. Unknown macros pass through literally and
//! steps without a keyword are labeled [`SemanticLabel::Other`].

pub mod classifier;
pub mod cleaner;
pub mod lexer;
pub mod patterns;
pub mod pipeline;
pub mod segmenter;
pub mod sentences;
pub mod types;

#[cfg(test)]
mod proptest;

// Re-exports for convenience
pub use classifier::StepClassifier;
pub use cleaner::{clean_markup, collapse_whitespace};
pub use lexer::{tokenize, Token, TokenKind};
pub use patterns::{PatternGroup, PatternTable};
pub use pipeline::{analyze, AnalyzerConfig, ProofAnalyzer};
pub use segmenter::{Segment, Segmenter, SegmenterConfig, DEFAULT_MARKERS};
pub use sentences::split_sentences;
pub use types::{render_steps, LabelCounts, SemanticLabel, Step};

/// Analyze a proof and render it as annotated lines.
///
/// Convenience for callers that only need the `Step <n>: <text> [<label>]`
/// form handed to prompt construction.
pub fn annotate(proof: &str) -> String {
    render_steps(&analyze(proof))
}

/// Count labels in an analyzed proof.
pub fn label_counts(steps: &[Step]) -> LabelCounts {
    LabelCounts::from_steps(steps)
}
