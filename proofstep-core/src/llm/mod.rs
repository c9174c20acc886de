//! LLM client abstraction used to deliver tutoring feedback.
//!
//! The tutor only depends on the [`LLMClient`] trait; the Gemini
//! implementation lives behind the `gemini` feature (on by default).
//!
//! ## Example
//!
//! ```rust,ignore
//! use proofstep_core::llm::{ChatMessage, ClientConfig, CompletionRequest, GoogleClient, LLMClient};
//!
//! let client = GoogleClient::new(ClientConfig::from_env()?)?;
//! let request = CompletionRequest::new().with_message(ChatMessage::user("Hello"));
//! let response = client.complete(request).await?;
//! ```

mod client;
mod types;

pub use client::{ClientConfig, LLMClient};
#[cfg(feature = "gemini")]
pub use client::GoogleClient;
pub use types::{
    ChatMessage, ChatRole, CompletionRequest, CompletionResponse, ModelSpec, Provider,
    StopReason, TokenUsage,
};
