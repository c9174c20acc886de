//! End-to-end proof analysis: segment, clean, split, classify.

use std::sync::Arc;

use tracing::debug;

use super::classifier::StepClassifier;
use super::cleaner::clean_markup;
use super::patterns::PatternTable;
use super::segmenter::{Segmenter, SegmenterConfig};
use super::sentences::split_sentences;
use super::types::Step;
use crate::error::{Error, Result};

/// Configuration for a [`ProofAnalyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Section-marker settings
    pub segmenter: SegmenterConfig,
    /// Label patterns, shared read-only
    pub patterns: Arc<PatternTable>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            patterns: PatternTable::shared_default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_segmenter(mut self, segmenter: SegmenterConfig) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_patterns(mut self, patterns: impl Into<Arc<PatternTable>>) -> Self {
        self.patterns = patterns.into();
        self
    }
}

/// Turns proof markup into classified, indexed steps.
///
/// Holds no mutable state; one analyzer can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ProofAnalyzer {
    segmenter: Segmenter,
    classifier: StepClassifier,
}

impl ProofAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            segmenter: Segmenter::new(config.segmenter),
            classifier: StepClassifier::new(config.patterns),
        }
    }

    pub fn classifier(&self) -> &StepClassifier {
        &self.classifier
    }

    /// Analyze a proof. Total: empty or malformed input never fails.
    pub fn analyze(&self, proof: &str) -> Vec<Step> {
        let segments = self.segmenter.segment(proof);
        let fragment_count = segments.len();

        let steps: Vec<Step> = segments
            .iter()
            .map(|segment| clean_markup(segment.raw()))
            .filter(|prose| !prose.is_empty())
            .flat_map(|prose| split_sentences(&prose))
            .enumerate()
            .map(|(i, text)| {
                let label = self.classifier.classify(&text);
                Step::new(i + 1, text, label)
            })
            .collect();

        debug!(
            fragments = fragment_count,
            steps = steps.len(),
            "analyzed proof"
        );
        steps
    }

    /// Analyze raw bytes; non-UTF-8 input is rejected.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<Vec<Step>> {
        let proof = std::str::from_utf8(bytes).map_err(|e| {
            Error::invalid_input(format!("Proof text is not valid UTF-8: {}", e))
        })?;
        Ok(self.analyze(proof))
    }

    /// Analyze several proofs independently.
    pub fn analyze_batch(&self, proofs: &[&str]) -> Vec<Vec<Step>> {
        proofs.iter().map(|p| self.analyze(p)).collect()
    }
}

/// Analyze a proof with the default configuration.
pub fn analyze(proof: &str) -> Vec<Step> {
    ProofAnalyzer::default().analyze(proof)
}
