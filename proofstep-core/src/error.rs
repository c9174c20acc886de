//! Error types for proofstep-core.

use thiserror::Error;

/// Result type alias using proofstep-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analyzing proofs or producing feedback.
///
/// Proof analysis itself is total over text; only [`Error::InvalidInput`] can
/// come out of the analyzer. The remaining variants belong to the storage,
/// prompt and language-model collaborators.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller handed in something that is not usable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No exercise stored under the requested key
    #[error("Exercise {exercise}.{question} not found")]
    ExerciseNotFound { exercise: u32, question: u32 },

    /// Exercise storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// LLM API error
    #[error("LLM error: {0}")]
    LLM(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an exercise-not-found error.
    pub fn exercise_not_found(exercise: u32, question: u32) -> Self {
        Self::ExerciseNotFound { exercise, question }
    }

    /// Whether the error was caused by the caller rather than a collaborator.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::ExerciseNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::invalid_input("not utf-8").to_string(),
            "Invalid input: not utf-8"
        );
        assert_eq!(
            Error::exercise_not_found(1, 3).to_string(),
            "Exercise 1.3 not found"
        );
    }

    #[test]
    fn test_caller_errors() {
        assert!(Error::invalid_input("x").is_caller_error());
        assert!(Error::exercise_not_found(2, 2).is_caller_error());
        assert!(!Error::config("x").is_caller_error());
        assert!(!Error::LLM("timeout".to_string()).is_caller_error());
    }
}
