//! # proofstep-core
//!
//! Segmentation and classification of mathematical proofs written in
//! LaTeX-like markup, plus an LLM-backed tutor that gives feedback on them.
//!
//! ## Core Components
//!
//! - **Analysis**: splits a proof into ordered steps and labels each one
//!   (assumption, inference, conclusion, induction, ...)
//! - **Exercises**: SQLite store of questions and reference solutions
//! - **Feedback**: prompt construction and the [`ProofTutor`]
//! - **LLM**: client trait and the Gemini provider
//!
//! ## Example
//!
//! ```rust
//! use proofstep_core::{analyze, SemanticLabel};
//!
//! let steps = analyze(r"\textbf{Proof} Assume $n$ is even. Therefore $n^2$ is even.");
//! assert_eq!(steps[1].label, SemanticLabel::Assumption);
//! assert_eq!(steps[2].to_string(), "Step 3: Therefore n^2 is even [conclusion]");
//! ```

pub mod analysis;
pub mod error;
pub mod exercises;
pub mod feedback;
pub mod llm;

// Re-exports for convenience
pub use analysis::{
    analyze, annotate, render_steps, AnalyzerConfig, LabelCounts, PatternTable, ProofAnalyzer,
    SegmenterConfig, SemanticLabel, Step, StepClassifier,
};
pub use error::{Error, Result};
pub use exercises::{Exercise, ExerciseKey, ExerciseSource, SqliteExerciseStore};
pub use feedback::{
    build_prompt, Feedback, FeedbackCommand, FeedbackRequest, ProofTutor, Scope, TutorConfig,
};
#[cfg(feature = "gemini")]
pub use llm::GoogleClient;
pub use llm::{ClientConfig, CompletionRequest, CompletionResponse, LLMClient, Provider};
