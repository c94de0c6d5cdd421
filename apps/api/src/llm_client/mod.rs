//! LLM Client — the single point of entry for all model calls in the ATS checker.
//!
//! ARCHITECTURAL RULE: No other module may call a model API directly.
//! Everything goes through a `CompletionProvider`, which the evaluator receives
//! as `Arc<dyn CompletionProvider>` so tests can swap in canned responses.
//!
//! Backends perform exactly one HTTP request per call. Retries are the
//! caller's decision, and the evaluator makes none.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

pub mod anthropic;
#[cfg(test)]
pub(crate) mod fake;
pub mod gemini;
pub mod prompts;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Short, user-facing description of the failure class.
    pub fn summary(&self) -> &'static str {
        match self {
            LlmError::Http(_) => "The AI service could not be reached",
            LlmError::Api { status: 401 | 403, .. } => "The AI service rejected the API credential",
            LlmError::Api { status: 429, .. } => "The AI service quota or rate limit was exceeded",
            LlmError::Api { status, .. } if *status >= 500 => "The AI service returned a server error",
            LlmError::Api { .. } => "The AI service rejected the request",
            LlmError::Parse(_) => "The AI service returned an unreadable envelope",
            LlmError::EmptyContent => "The AI service returned no text",
        }
    }
}

/// A text-completion capability: model identifier + prompt in, raw text out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Backend label, used in logs and responses.
    fn name(&self) -> &'static str;

    async fn complete(&self, model: &str, prompt: &str, system: &str)
        -> Result<String, LlmError>;
}

/// Shared HTTP client for the concrete backends. No overall request timeout is
/// set here; the evaluator bounds each call with its own deadline.
pub(crate) fn build_http_client() -> Result<Client, LlmError> {
    Ok(Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?)
}

/// Turns a non-success response into `LlmError::Api`, preferring the
/// provider's own error message when the body carries one.
pub(crate) async fn api_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProviderError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

/// Both Gemini and Anthropic wrap errors as `{"error": {"message": ...}}`.
#[derive(Debug, serde::Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ProviderErrorBody {
    message: String,
}
