//! Core types for proof analysis.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Semantic role a reasoning step plays in a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticLabel {
    /// Introduces an object or hypothesis ("let", "assume")
    Assumption,
    /// Derives something from what came before ("then", "hence")
    Inference,
    /// Closes an argument ("therefore", "we conclude")
    Conclusion,
    /// Part of an induction argument ("base case", "inductive step")
    Induction,
    /// Part of a proof by contradiction
    Contradiction,
    /// Splits the argument into cases
    Case,
    /// States a claim or truth value
    Claim,
    /// No configured pattern matched
    Other,
}

impl SemanticLabel {
    /// All labels, in default priority order with `Other` last.
    pub const ALL: [SemanticLabel; 8] = [
        Self::Assumption,
        Self::Inference,
        Self::Conclusion,
        Self::Induction,
        Self::Contradiction,
        Self::Case,
        Self::Claim,
        Self::Other,
    ];

    /// Lower-case name used when rendering steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assumption => "assumption",
            Self::Inference => "inference",
            Self::Conclusion => "conclusion",
            Self::Induction => "induction",
            Self::Contradiction => "contradiction",
            Self::Case => "case",
            Self::Claim => "claim",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for SemanticLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SemanticLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == lower)
            .ok_or_else(|| Error::invalid_input(format!("Unknown semantic label: {}", s)))
    }
}

/// One atomic reasoning step extracted from a proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position in the analyzed proof
    pub index: usize,
    /// Cleaned prose of the step
    pub text: String,
    /// Classified role
    pub label: SemanticLabel,
}

impl Step {
    /// Create a new step.
    pub fn new(index: usize, text: impl Into<String>, label: SemanticLabel) -> Self {
        Self {
            index,
            text: text.into(),
            label,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {}: {} [{}]", self.index, self.text, self.label)
    }
}

/// Render steps as one `Step <index>: <text> [<label>]` line each.
pub fn render_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of steps per label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub assumption: usize,
    pub inference: usize,
    pub conclusion: usize,
    pub induction: usize,
    pub contradiction: usize,
    pub case: usize,
    pub claim: usize,
    pub other: usize,
}

impl LabelCounts {
    /// Count labels across a step sequence.
    pub fn from_steps(steps: &[Step]) -> Self {
        let mut counts = Self::default();
        for step in steps {
            match step.label {
                SemanticLabel::Assumption => counts.assumption += 1,
                SemanticLabel::Inference => counts.inference += 1,
                SemanticLabel::Conclusion => counts.conclusion += 1,
                SemanticLabel::Induction => counts.induction += 1,
                SemanticLabel::Contradiction => counts.contradiction += 1,
                SemanticLabel::Case => counts.case += 1,
                SemanticLabel::Claim => counts.claim += 1,
                SemanticLabel::Other => counts.other += 1,
            }
        }
        counts
    }

    /// Count for a single label.
    pub fn get(&self, label: SemanticLabel) -> usize {
        match label {
            SemanticLabel::Assumption => self.assumption,
            SemanticLabel::Inference => self.inference,
            SemanticLabel::Conclusion => self.conclusion,
            SemanticLabel::Induction => self.induction,
            SemanticLabel::Contradiction => self.contradiction,
            SemanticLabel::Case => self.case,
            SemanticLabel::Claim => self.claim,
            SemanticLabel::Other => self.other,
        }
    }

    /// Total number of steps counted.
    pub fn total(&self) -> usize {
        SemanticLabel::ALL.iter().map(|l| self.get(*l)).sum()
    }

    /// Fraction of steps that matched some pattern.
    pub fn classified_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (total - self.other) as f64 / total as f64
        }
    }
}
