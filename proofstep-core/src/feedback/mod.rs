//! Tutoring feedback on analyzed proofs.
//!
//! A [`ProofTutor`] looks up the exercise, analyzes the student's proof
//! into steps and asks a language model to compare it with the reference
//! solution, judge its direction, or give a hint. Every prompt carries a
//! [`Scope`] restricting what the model may accept as valid reasoning.

mod prompt;
mod scope;
mod tutor;

pub use prompt::{build_prompt, FeedbackCommand};
pub use scope::{Scope, SCOPE_FILE_ENV};
pub use tutor::{Feedback, FeedbackRequest, ProofTutor, TutorConfig};
