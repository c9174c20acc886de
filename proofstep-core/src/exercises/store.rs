//! SQLite-backed exercise store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::schema::{initialize_schema, is_initialized};
use super::seed::builtin_exercises;
use super::types::{Exercise, ExerciseKey};
use super::ExerciseSource;
use crate::error::{Error, Result};

const EXERCISE_COLUMNS: &str = "exercise, question_num, question, model_answer, scope, created_at";

/// SQLite-backed exercise store.
///
/// Cloning shares the underlying connection.
#[derive(Clone)]
pub struct SqliteExerciseStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteExerciseStore {
    /// Open or create an exercise store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| Error::Storage(e.to_string()))?;

        if !is_initialized(&conn) {
            initialize_schema(&conn).map_err(|e| Error::Storage(e.to_string()))?;
        }
        debug!(path = %path.display(), "Opened exercise store");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Storage(e.to_string()))?;
        initialize_schema(&conn).map_err(|e| Error::Storage(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| Error::Internal(format!("Failed to lock connection: {}", e)))?;
        f(&conn).map_err(|e| Error::Storage(e.to_string()))
    }

    /// Insert an exercise, replacing any existing one under the same key.
    pub fn upsert(&self, exercise: &Exercise) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO exercises (exercise, question_num, question, model_answer, scope, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (exercise, question_num) DO UPDATE SET
                    question = excluded.question,
                    model_answer = excluded.model_answer,
                    scope = excluded.scope",
                params![
                    exercise.key.exercise,
                    exercise.key.question,
                    exercise.question,
                    exercise.model_answer,
                    exercise.scope,
                    exercise.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    /// Get an exercise by key.
    pub fn fetch(&self, key: &ExerciseKey) -> Result<Option<Exercise>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {} FROM exercises WHERE exercise = ?1 AND question_num = ?2",
                    EXERCISE_COLUMNS
                ),
                params![key.exercise, key.question],
                Self::row_to_exercise,
            )
            .optional()
        })
    }

    /// List exercises ordered by key, optionally restricted to one sheet.
    pub fn list(&self, exercise: Option<u32>) -> Result<Vec<Exercise>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM exercises
                 WHERE ?1 IS NULL OR exercise = ?1
                 ORDER BY exercise, question_num",
                EXERCISE_COLUMNS
            ))?;
            let rows = stmt.query_map(params![exercise], Self::row_to_exercise)?;
            rows.collect()
        })
    }

    /// Remove an exercise. Returns whether anything was deleted.
    pub fn remove(&self, key: &ExerciseKey) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM exercises WHERE exercise = ?1 AND question_num = ?2",
                params![key.exercise, key.question],
            )?;
            Ok(deleted > 0)
        })
    }

    /// Number of stored exercises.
    pub fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| {
                row.get::<_, i64>(0)
            })
        })
        .map(|n| n as u64)
    }

    /// Store the built-in exercises. Safe to call repeatedly.
    pub fn seed_examples(&self) -> Result<usize> {
        let exercises = builtin_exercises()?;
        for exercise in &exercises {
            self.upsert(exercise)?;
        }
        info!(count = exercises.len(), "Seeded built-in exercises");
        Ok(exercises.len())
    }

    fn row_to_exercise(row: &Row<'_>) -> rusqlite::Result<Exercise> {
        let created_at: String = row.get(5)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(Exercise {
            key: ExerciseKey::new(row.get(0)?, row.get(1)?),
            question: row.get(2)?,
            model_answer: row.get(3)?,
            scope: row.get(4)?,
            created_at,
        })
    }
}

impl ExerciseSource for SqliteExerciseStore {
    fn fetch(&self, key: &ExerciseKey) -> Result<Option<Exercise>> {
        SqliteExerciseStore::fetch(self, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(exercise: u32, question: u32) -> Exercise {
        Exercise::new(
            ExerciseKey::new(exercise, question),
            format!("Question {}.{}", exercise, question),
            "Step 1: Assume x [assumption]",
        )
        .unwrap()
    }

    #[test]
    fn test_upsert_and_get() {
        let store = SqliteExerciseStore::in_memory().unwrap();
        let ex = exercise(1, 1).with_scope("Only field axioms");
        store.upsert(&ex).unwrap();

        let fetched = store.fetch(&ex.key).unwrap().unwrap();
        assert_eq!(fetched.question, "Question 1.1");
        assert_eq!(fetched.scope.as_deref(), Some("Only field axioms"));
        assert_eq!(fetched.created_at.timestamp(), ex.created_at.timestamp());
    }

    #[test]
    fn test_key_is_composite() {
        let store = SqliteExerciseStore::in_memory().unwrap();
        store.upsert(&exercise(1, 2)).unwrap();
        store.upsert(&exercise(2, 1)).unwrap();

        assert!(store.fetch(&ExerciseKey::new(1, 1)).unwrap().is_none());
        assert!(store.fetch(&ExerciseKey::new(2, 2)).unwrap().is_none());
        assert_eq!(
            store.fetch(&ExerciseKey::new(2, 1)).unwrap().unwrap().question,
            "Question 2.1"
        );
    }

    #[test]
    fn test_upsert_replaces() {
        let store = SqliteExerciseStore::in_memory().unwrap();
        store.upsert(&exercise(1, 1)).unwrap();

        let mut updated = exercise(1, 1);
        updated.model_answer = "Step 1: Suppose y [assumption]".to_string();
        store.upsert(&updated).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let fetched = store.fetch(&updated.key).unwrap().unwrap();
        assert_eq!(fetched.model_answer, "Step 1: Suppose y [assumption]");
    }

    #[test]
    fn test_list_and_remove() {
        let store = SqliteExerciseStore::in_memory().unwrap();
        store.upsert(&exercise(2, 1)).unwrap();
        store.upsert(&exercise(1, 2)).unwrap();
        store.upsert(&exercise(1, 1)).unwrap();

        let keys: Vec<_> = store.list(None).unwrap().into_iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec![
                ExerciseKey::new(1, 1),
                ExerciseKey::new(1, 2),
                ExerciseKey::new(2, 1)
            ]
        );
        assert_eq!(store.list(Some(1)).unwrap().len(), 2);

        assert!(store.remove(&ExerciseKey::new(1, 2)).unwrap());
        assert!(!store.remove(&ExerciseKey::new(1, 2)).unwrap());
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_seed_examples_is_idempotent() {
        let store = SqliteExerciseStore::in_memory().unwrap();
        assert_eq!(store.seed_examples().unwrap(), 4);
        assert_eq!(store.seed_examples().unwrap(), 4);
        assert_eq!(store.count().unwrap(), 4);

        let source: &dyn ExerciseSource = &store;
        let ex = source.fetch(&ExerciseKey::new(1, 3)).unwrap().unwrap();
        assert!(ex.question.contains("induction"));
    }

    #[test]
    fn test_persists_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exercises.db");

        {
            let store = SqliteExerciseStore::open(&path).unwrap();
            store.upsert(&exercise(3, 1)).unwrap();
        }

        let reopened = SqliteExerciseStore::open(&path).unwrap();
        assert!(reopened.fetch(&ExerciseKey::new(3, 1)).unwrap().is_some());
    }
}
