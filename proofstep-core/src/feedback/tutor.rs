//! LLM-backed proof tutor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::prompt::{build_prompt, FeedbackCommand};
use super::scope::Scope;
use crate::analysis::{ProofAnalyzer, Step};
use crate::error::{Error, Result};
use crate::exercises::{Exercise, ExerciseKey, ExerciseSource};
use crate::llm::{ChatMessage, CompletionRequest, LLMClient, TokenUsage};

/// Configuration for the tutor.
#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// Model override (client default when unset)
    pub model: Option<String>,
    /// Maximum tokens per answer
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f64,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 2048,
            temperature: 0.2,
        }
    }
}

impl TutorConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A student's request for feedback on one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub key: ExerciseKey,
    /// The student's proof markup
    pub proof: String,
    pub command: FeedbackCommand,
}

impl FeedbackRequest {
    pub fn new(key: ExerciseKey, proof: impl Into<String>, command: FeedbackCommand) -> Self {
        Self {
            key,
            proof: proof.into(),
            command,
        }
    }

    /// Build a request from untyped fields, e.g. form input.
    pub fn from_raw(exercise: u32, question: u32, proof: &str, command: &str) -> Result<Self> {
        Ok(Self::new(
            ExerciseKey::new(exercise, question),
            proof,
            command.parse()?,
        ))
    }
}

/// Tutor answer together with what was sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub key: ExerciseKey,
    pub command: FeedbackCommand,
    /// The student's proof as analyzed steps
    pub steps: Vec<Step>,
    /// Prompt sent to the model
    pub prompt: String,
    /// Model answer text
    pub response: String,
    pub usage: TokenUsage,
}

/// Analyzes student proofs and asks a language model for feedback on them.
pub struct ProofTutor {
    client: Arc<dyn LLMClient>,
    exercises: Arc<dyn ExerciseSource>,
    analyzer: ProofAnalyzer,
    scope: Scope,
    config: TutorConfig,
}

impl ProofTutor {
    /// Create a tutor. `scope` applies to exercises without their own.
    pub fn new(
        client: Arc<dyn LLMClient>,
        exercises: Arc<dyn ExerciseSource>,
        scope: Scope,
        config: TutorConfig,
    ) -> Self {
        Self {
            client,
            exercises,
            analyzer: ProofAnalyzer::default(),
            scope,
            config,
        }
    }

    /// Create with default configuration.
    pub fn with_defaults(
        client: Arc<dyn LLMClient>,
        exercises: Arc<dyn ExerciseSource>,
        scope: Scope,
    ) -> Self {
        Self::new(client, exercises, scope, TutorConfig::default())
    }

    /// Replace the analyzer, e.g. to use custom markers or patterns.
    pub fn with_analyzer(mut self, analyzer: ProofAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Build the prompt for a request without contacting the model.
    pub fn prompt_for(&self, request: &FeedbackRequest) -> Result<String> {
        let (_, prompt) = self.prepare(request)?;
        Ok(prompt)
    }

    /// Analyze the student's proof and ask the model for feedback.
    #[instrument(skip(self, request), fields(exercise = %request.key, command = %request.command))]
    pub async fn feedback(&self, request: FeedbackRequest) -> Result<Feedback> {
        let (steps, prompt) = self.prepare(&request)?;

        let mut completion = CompletionRequest::new()
            .with_message(ChatMessage::user(prompt.clone()))
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);
        if let Some(ref model) = self.config.model {
            completion = completion.with_model(model.clone());
        }

        let response = self.client.complete(completion).await.map_err(|e| {
            warn!(error = %e, "Feedback request failed");
            e
        })?;
        if response.content.trim().is_empty() {
            warn!(stop_reason = ?response.stop_reason, "Model returned an empty answer");
        }
        info!(
            steps = steps.len(),
            tokens = response.usage.total(),
            "Feedback generated"
        );

        Ok(Feedback {
            key: request.key,
            command: request.command,
            steps,
            prompt,
            response: response.content,
            usage: response.usage,
        })
    }

    fn prepare(&self, request: &FeedbackRequest) -> Result<(Vec<Step>, String)> {
        let exercise = self.exercise(&request.key)?;
        let steps = self.analyzer.analyze(&request.proof);

        let scope = match exercise.scope.as_deref() {
            Some(text) => Scope::new(text)?,
            None => self.scope.clone(),
        };
        debug!(steps = steps.len(), "Analyzed student proof");

        let prompt = build_prompt(request.command, &exercise.model_answer, &steps, &scope);
        Ok((steps, prompt))
    }

    fn exercise(&self, key: &ExerciseKey) -> Result<Exercise> {
        match self.exercises.fetch(key)? {
            Some(exercise) => {
                debug!(exercise = %key, "Found exercise");
                Ok(exercise)
            }
            None => {
                warn!(exercise = %key, "Exercise not found");
                Err(Error::exercise_not_found(key.exercise, key.question))
            }
        }
    }
}
