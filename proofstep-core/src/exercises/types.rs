//! Exercise records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifies one question of one exercise sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExerciseKey {
    /// Exercise (sheet) number
    pub exercise: u32,
    /// Question number within the exercise
    pub question: u32,
}

impl ExerciseKey {
    pub fn new(exercise: u32, question: u32) -> Self {
        Self { exercise, question }
    }
}

impl std::fmt::Display for ExerciseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.exercise, self.question)
    }
}

impl std::str::FromStr for ExerciseKey {
    type Err = Error;

    /// Parse `"<exercise>.<question>"`, e.g. `"1.3"`.
    fn from_str(s: &str) -> Result<Self> {
        let (exercise, question) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| Error::invalid_input(format!("Invalid exercise key: {}", s)))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| Error::invalid_input(format!("Invalid exercise key: {}", s)))
        };
        Ok(Self::new(parse(exercise)?, parse(question)?))
    }
}

/// A stored exercise with its reference solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub key: ExerciseKey,
    /// Question shown to the student
    pub question: String,
    /// Reference solution, treated as opaque text
    pub model_answer: String,
    /// Exercise-specific scope overriding the tutor default
    pub scope: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Create an exercise. Question and model answer must be non-empty.
    pub fn new(
        key: ExerciseKey,
        question: impl Into<String>,
        model_answer: impl Into<String>,
    ) -> Result<Self> {
        let question = question.into();
        let model_answer = model_answer.into();
        if question.trim().is_empty() {
            return Err(Error::invalid_input(format!("Exercise {} has no question", key)));
        }
        if model_answer.trim().is_empty() {
            return Err(Error::invalid_input(format!(
                "Exercise {} has no model answer",
                key
            )));
        }

        Ok(Self {
            key,
            question,
            model_answer,
            scope: None,
            created_at: Utc::now(),
        })
    }

    /// Set an exercise-specific scope. Blank scopes are ignored.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = if scope.trim().is_empty() {
            None
        } else {
            Some(scope)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parse_and_display() {
        let key: ExerciseKey = "1.3".parse().unwrap();
        assert_eq!(key, ExerciseKey::new(1, 3));
        assert_eq!(key.to_string(), "1.3");
        assert!("13".parse::<ExerciseKey>().is_err());
        assert!("1.x".parse::<ExerciseKey>().is_err());
    }

    #[test]
    fn test_exercise_requires_text() {
        let key = ExerciseKey::new(1, 1);
        assert!(Exercise::new(key, "  ", "answer").is_err());
        assert!(Exercise::new(key, "question", "").is_err());
        assert!(Exercise::new(key, "question", "answer").is_ok());
    }

    #[test]
    fn test_blank_scope_ignored() {
        let exercise = Exercise::new(ExerciseKey::new(2, 1), "q", "a")
            .unwrap()
            .with_scope("   ");
        assert_eq!(exercise.scope, None);
    }
}
