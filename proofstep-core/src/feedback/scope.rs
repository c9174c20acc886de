//! Permitted-knowledge scope.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable naming the default scope file.
pub const SCOPE_FILE_ENV: &str = "PROOFSTEP_SCOPE_FILE";

/// Text describing which facts and methods a student may use.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Scope(String);

impl Scope {
    /// Create a scope. Blank text is a configuration error.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::config("Scope is empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Read a scope from a file. `~` and environment variables in the path
    /// are expanded.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = path.as_ref().to_string_lossy();
        let expanded = shellexpand::full(&raw)
            .map_err(|e| Error::config(format!("Failed to expand scope path {}: {}", raw, e)))?;

        let text = std::fs::read_to_string(&*expanded).map_err(|e| {
            Error::config(format!("Failed to read scope file {}: {}", expanded, e))
        })?;
        debug!(path = %expanded, bytes = text.len(), "Loaded scope");

        Self::new(text)
            .map_err(|_| Error::config(format!("Scope file {} is empty", expanded)))
    }

    /// Read the scope file named by `PROOFSTEP_SCOPE_FILE`.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(SCOPE_FILE_ENV)
            .map_err(|_| Error::config(format!("{} not set", SCOPE_FILE_ENV)))?;
        Self::from_file(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Scope {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        Self::new(text)
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.0
    }
}
