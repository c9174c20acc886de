//! LLM client trait and the Gemini provider implementation.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{Error, Result};

use super::types::{CompletionRequest, CompletionResponse, ModelSpec, Provider};

/// LLM client trait for making completions.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Complete a prompt.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider for this client.
    fn provider(&self) -> Provider;

    /// List available models.
    fn available_models(&self) -> Vec<ModelSpec>;
}

/// Configuration for LLM clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key
    pub api_key: String,
    /// Base URL override
    pub base_url: Option<String>,
    /// Default model
    pub default_model: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Max retries on transient failure
    pub max_retries: u32,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            default_model: None,
            timeout_secs: 120,
            max_retries: 3,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_BASE_URL`, `GEMINI_MODEL` and
    /// `GEMINI_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::config("GEMINI_API_KEY is not set"))?;

        let mut config = Self::new(api_key);
        config.base_url = std::env::var("GEMINI_BASE_URL").ok();
        config.default_model = std::env::var("GEMINI_MODEL").ok();
        if let Some(timeout) = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// Delay before retry `attempt` (1-based): 500ms, 1s, 2s, ...
#[cfg_attr(not(feature = "gemini"), allow(dead_code))]
fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(500u64.saturating_mul(1u64 << attempt.saturating_sub(1).min(6)))
}

#[cfg(feature = "gemini")]
pub use gemini::GoogleClient;

#[cfg(feature = "gemini")]
mod gemini {
    use super::*;

    use chrono::Utc;
    use reqwest::Client;
    use serde::{Deserialize, Serialize};
    use tracing::{debug, warn};

    use crate::llm::types::{ChatRole, StopReason, TokenUsage};

    fn build_http_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::LLM(format!("Failed to create HTTP client: {}", e)))
    }

    /// Google Gemini client.
    pub struct GoogleClient {
        config: ClientConfig,
        http: Client,
    }

    impl GoogleClient {
        const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
        const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";

        pub fn new(config: ClientConfig) -> Result<Self> {
            let http = build_http_client(config.timeout_secs)?;

            Ok(Self { config, http })
        }

        fn base_url(&self) -> &str {
            self.config
                .base_url
                .as_deref()
                .unwrap_or(Self::DEFAULT_BASE_URL)
        }

        fn endpoint(&self, model: &str) -> String {
            format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url().trim_end_matches('/'),
                model
            )
        }

        /// One HTTP round trip. `Ok(Err(..))` marks a retryable failure.
        async fn send_once(
            &self,
            url: &str,
            body: &GeminiRequest,
        ) -> Result<std::result::Result<String, Error>> {
            let response = match self
                .http
                .post(url)
                .query(&[("key", self.config.api_key.as_str())])
                .header("content-type", "application/json")
                .json(body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) if e.is_timeout() || e.is_connect() => {
                    return Ok(Err(Error::LLM(format!("HTTP request failed: {}", e))))
                }
                Err(e) => return Err(Error::LLM(format!("HTTP request failed: {}", e))),
            };

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| Error::LLM(format!("Failed to read response: {}", e)))?;

            if status.is_success() {
                return Ok(Ok(text));
            }

            let message = match serde_json::from_str::<GeminiError>(&text) {
                Ok(error) => format!("Gemini API error: {}", error.error.message),
                Err(_) => format!("Gemini API error ({}): {}", status, text),
            };
            if status.is_server_error() || status.as_u16() == 429 {
                Ok(Err(Error::LLM(message)))
            } else {
                Err(Error::LLM(message))
            }
        }
    }

    // Google Gemini API types
    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct GeminiRequest {
        pub(super) contents: Vec<GeminiContent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub(super) system_instruction: Option<GeminiContent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub(super) generation_config: Option<GeminiGenerationConfig>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub(super) struct GeminiContent {
        #[serde(default)]
        pub(super) role: String,
        #[serde(default)]
        pub(super) parts: Vec<GeminiPart>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub(super) struct GeminiPart {
        #[serde(default)]
        pub(super) text: String,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct GeminiGenerationConfig {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub(super) max_output_tokens: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub(super) temperature: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub(super) stop_sequences: Option<Vec<String>>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct GeminiResponse {
        #[serde(default)]
        pub(super) candidates: Vec<GeminiCandidate>,
        pub(super) usage_metadata: Option<GeminiUsageMetadata>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct GeminiCandidate {
        pub(super) content: Option<GeminiContent>,
        pub(super) finish_reason: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct GeminiUsageMetadata {
        #[serde(default)]
        pub(super) prompt_token_count: u64,
        pub(super) candidates_token_count: Option<u64>,
    }

    #[derive(Debug, Deserialize)]
    struct GeminiError {
        error: GeminiErrorDetail,
    }

    #[derive(Debug, Deserialize)]
    struct GeminiErrorDetail {
        message: String,
    }

    pub(super) fn build_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent {
                role: match m.role {
                    ChatRole::User => "user".to_string(),
                    ChatRole::Assistant => "model".to_string(),
                },
                parts: vec![GeminiPart {
                    text: m.content.clone(),
                }],
            })
            .collect();

        // System instruction (Gemini's equivalent of system prompt)
        let system_instruction = request.system.as_ref().map(|s| GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart { text: s.clone() }],
        });

        let generation_config = Some(GeminiGenerationConfig {
            max_output_tokens: request.max_tokens,
            temperature: request.temperature,
            stop_sequences: request.stop.clone(),
        });

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    pub(super) fn parse_response(body: &str, model: &str) -> Result<CompletionResponse> {
        let api_response: GeminiResponse = serde_json::from_str(body)
            .map_err(|e| Error::LLM(format!("Failed to parse response: {}", e)))?;

        let candidate = api_response
            .candidates
            .first()
            .ok_or_else(|| Error::LLM("No candidates in response".to_string()))?;

        let content = candidate
            .content
            .as_ref()
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let stop_reason = candidate.finish_reason.as_deref().map(|r| match r {
            "MAX_TOKENS" => StopReason::MaxTokens,
            "STOP_SEQUENCE" => StopReason::StopSequence,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => StopReason::Safety,
            _ => StopReason::EndTurn,
        });

        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count.unwrap_or(0),
            })
            .unwrap_or_default();

        // Gemini doesn't return an ID
        let id = format!("gemini-{}", Utc::now().timestamp_millis());

        Ok(CompletionResponse {
            id,
            model: model.to_string(),
            content,
            stop_reason,
            usage,
            timestamp: Utc::now(),
        })
    }

    #[async_trait]
    impl LLMClient for GoogleClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
            let model = request
                .model
                .clone()
                .or_else(|| self.config.default_model.clone())
                .unwrap_or_else(|| Self::DEFAULT_MODEL.to_string());

            let api_request = build_request(&request);
            let url = self.endpoint(&model);

            let mut attempt = 0;
            let body = loop {
                match self.send_once(&url, &api_request).await? {
                    Ok(body) => break body,
                    Err(e) if attempt < self.config.max_retries => {
                        attempt += 1;
                        let delay = retry_delay(attempt);
                        warn!(error = %e, attempt, ?delay, "retrying Gemini request");
                        tokio::time::sleep(delay).await;
                    }
                    Err(e) => return Err(e),
                }
            };

            let response = parse_response(&body, &model)?;
            debug!(
                model = %response.model,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "Gemini completion"
            );
            Ok(response)
        }

        fn provider(&self) -> Provider {
            Provider::Google
        }

        fn available_models(&self) -> Vec<ModelSpec> {
            vec![
                ModelSpec::gemini_2_0_flash(),
                ModelSpec::gemini_1_5_pro(),
                ModelSpec::gemini_1_5_flash(),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("test-key")
            .with_base_url("https://custom.api.com")
            .with_default_model("gemini-1.5-pro")
            .with_timeout(60)
            .with_max_retries(1);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, Some("https://custom.api.com".to_string()));
        assert_eq!(config.default_model, Some("gemini-1.5-pro".to_string()));
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_retry_delay_grows() {
        assert_eq!(retry_delay(1), Duration::from_millis(500));
        assert_eq!(retry_delay(2), Duration::from_millis(1000));
        assert_eq!(retry_delay(3), Duration::from_millis(2000));
        assert_eq!(retry_delay(50), Duration::from_millis(32_000));
    }

    #[cfg(feature = "gemini")]
    mod gemini_wire {
        use super::super::gemini::{build_request, parse_response};
        use super::super::*;
        use crate::llm::types::{ChatMessage, StopReason};

        #[test]
        fn test_google_available_models() {
            let client = GoogleClient::new(ClientConfig::new("test")).unwrap();
            let models = client.available_models();

            assert_eq!(models.len(), 3);
            assert!(models.iter().any(|m| m.id == "gemini-2.0-flash"));
            assert_eq!(client.provider(), Provider::Google);
        }

        #[test]
        fn test_request_serialization() {
            let request = CompletionRequest::new()
                .with_system("Be rigorous")
                .with_message(ChatMessage::user("Step 1: Let x > 0 [assumption]"))
                .with_max_tokens(256);

            let json = serde_json::to_value(build_request(&request)).unwrap();
            assert_eq!(json["contents"][0]["role"], "user");
            assert_eq!(
                json["contents"][0]["parts"][0]["text"],
                "Step 1: Let x > 0 [assumption]"
            );
            assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Be rigorous");
            assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
            assert!(json["generationConfig"].get("temperature").is_none());
        }

        #[test]
        fn test_parse_response_joins_parts() {
            let body = r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "The proof "}, {"text": "is correct."}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 40, "candidatesTokenCount": 6, "totalTokenCount": 46}
            }"#;

            let response = parse_response(body, "gemini-2.0-flash").unwrap();
            assert_eq!(response.content, "The proof is correct.");
            assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
            assert_eq!(response.usage.total(), 46);
            assert_eq!(response.model, "gemini-2.0-flash");
        }

        #[test]
        fn test_parse_response_without_candidates() {
            let result = parse_response(r#"{"candidates": []}"#, "gemini-2.0-flash");
            assert!(matches!(result, Err(Error::LLM(_))));
        }

        #[test]
        fn test_parse_blocked_candidate() {
            let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
            let response = parse_response(body, "m").unwrap();
            assert_eq!(response.content, "");
            assert_eq!(response.stop_reason, Some(StopReason::Safety));
        }
    }
}
