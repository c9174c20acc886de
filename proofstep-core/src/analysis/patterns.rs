//! Priority-ordered keyword table used to label steps.
//!
//! Groups are checked in declaration order and the first group with a match
//! wins, so the order of [`PatternTable::groups`] is the tie-break rule.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use super::types::SemanticLabel;
use crate::error::{Error, Result};

/// Default groups, highest priority first.
const DEFAULT_GROUPS: &[(SemanticLabel, &[&str])] = &[
    (
        SemanticLabel::Assumption,
        &[
            "let ", "lets", "assume", "asume", "suppose", "supose", "given", "for all", "for any",
        ],
    ),
    (
        SemanticLabel::Inference,
        &["then", "it follows", "hence", "so", "thus", "implies"],
    ),
    (
        SemanticLabel::Conclusion,
        &["therefore", "we conclude", "we have shown", "proved", "hence proved"],
    ),
    (
        SemanticLabel::Induction,
        &["by induction", "inductive", "base case", "inductive step"],
    ),
    (
        SemanticLabel::Contradiction,
        &[
            "contradiction",
            "assume the contrary",
            "suppose not",
            "leads to a contradiction",
        ],
    ),
    (
        SemanticLabel::Case,
        &["case ", "cases:", "consider the case", "if ", "otherwise"],
    ),
    (SemanticLabel::Claim, &["claim", "true", "false"]),
];

static DEFAULT_TABLE: LazyLock<Arc<PatternTable>> = LazyLock::new(|| {
    let groups = DEFAULT_GROUPS
        .iter()
        .map(|(label, patterns)| (*label, patterns.iter().map(|p| p.to_string()).collect()));
    Arc::new(PatternTable::new(groups).expect("default pattern table is valid"))
});

/// Patterns for one label, compiled into a single case-insensitive regex.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    /// Label assigned when the group matches
    pub label: SemanticLabel,
    /// Source patterns (regular expressions)
    pub patterns: Vec<String>,
    matcher: Regex,
}

impl PatternGroup {
    /// Compile a group. Patterns are regular expressions matched anywhere.
    pub fn new(label: SemanticLabel, patterns: Vec<String>) -> Result<Self> {
        if label == SemanticLabel::Other {
            return Err(Error::config("`other` is the fallback label and cannot own patterns"));
        }
        if patterns.is_empty() {
            return Err(Error::config(format!("Pattern group `{}` is empty", label)));
        }

        let alternation = patterns
            .iter()
            .map(|p| format!("(?:{})", p))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = Regex::new(&format!("(?i){}", alternation)).map_err(|e| {
            Error::config(format!("Invalid pattern in group `{}`: {}", label, e))
        })?;

        Ok(Self {
            label,
            patterns,
            matcher,
        })
    }

    /// Whether any pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// Ordered mapping from labels to pattern groups.
#[derive(Debug, Clone)]
pub struct PatternTable {
    groups: Vec<PatternGroup>,
}

impl PatternTable {
    /// Build a table from `(label, patterns)` pairs in priority order.
    ///
    /// Each label may appear once; `Other` may not appear at all.
    pub fn new<I>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SemanticLabel, Vec<String>)>,
    {
        let mut compiled: Vec<PatternGroup> = Vec::new();
        for (label, patterns) in groups {
            if compiled.iter().any(|g| g.label == label) {
                return Err(Error::config(format!(
                    "Label `{}` declared more than once",
                    label
                )));
            }
            compiled.push(PatternGroup::new(label, patterns)?);
        }
        Ok(Self { groups: compiled })
    }

    /// The shared default table.
    pub fn shared_default() -> Arc<Self> {
        Arc::clone(&DEFAULT_TABLE)
    }

    /// Groups in priority order.
    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    /// Labels in priority order.
    pub fn priority(&self) -> Vec<SemanticLabel> {
        self.groups.iter().map(|g| g.label).collect()
    }

    /// First label whose group matches `text`, if any.
    pub fn first_match(&self, text: &str) -> Option<SemanticLabel> {
        self.groups
            .iter()
            .find(|g| g.is_match(text))
            .map(|g| g.label)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        DEFAULT_TABLE.as_ref().clone()
    }
}
