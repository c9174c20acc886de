//! Exercise storage.
//!
//! Exercises pair a question with its reference solution and an optional
//! scope. The tutor looks them up through [`ExerciseSource`], so any
//! backing store works; [`SqliteExerciseStore`] is the persistent one.

mod schema;
mod seed;
mod store;
mod types;

use std::collections::HashMap;

pub use schema::SCHEMA_VERSION;
pub use seed::builtin_exercises;
pub use store::SqliteExerciseStore;
pub use types::{Exercise, ExerciseKey};

use crate::error::Result;

/// Lookup of exercises by key.
pub trait ExerciseSource: Send + Sync {
    /// Fetch an exercise, `None` when nothing is stored under `key`.
    fn fetch(&self, key: &ExerciseKey) -> Result<Option<Exercise>>;
}

impl ExerciseSource for HashMap<ExerciseKey, Exercise> {
    fn fetch(&self, key: &ExerciseKey) -> Result<Option<Exercise>> {
        Ok(self.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source() {
        let exercises: HashMap<_, _> = builtin_exercises()
            .unwrap()
            .into_iter()
            .map(|e| (e.key, e))
            .collect();

        assert!(exercises.fetch(&ExerciseKey::new(1, 4)).unwrap().is_some());
        assert!(exercises.fetch(&ExerciseKey::new(1, 5)).unwrap().is_none());
    }
}
