use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::llm_client::{anthropic, gemini};

const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which hosted model API backs the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    Anthropic,
}

impl LlmProvider {
    fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GEMINI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Gemini => gemini::DEFAULT_MODEL,
            LlmProvider::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(LlmProvider::Gemini),
            "anthropic" => Ok(LlmProvider::Anthropic),
            other => Err(anyhow!(
                "LLM_PROVIDER must be 'gemini' or 'anthropic', got '{other}'"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if the chosen provider's API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_provider: LlmProvider,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    /// Overrides the provider's public endpoint (proxies, local gateways).
    pub llm_base_url: Option<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_provider = match var("LLM_PROVIDER") {
            Some(v) => v.parse()?,
            None => LlmProvider::Gemini,
        };

        let key_var = llm_provider.api_key_var();
        let llm_api_key = var(key_var)
            .with_context(|| format!("Required environment variable '{key_var}' is not set"))?;

        let llm_timeout_secs = match var("LLM_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };
        if llm_timeout_secs == 0 {
            return Err(anyhow!("LLM_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Config {
            llm_provider,
            llm_api_key,
            llm_model: var("LLM_MODEL").unwrap_or_else(|| llm_provider.default_model().to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            llm_base_url: var("LLM_BASE_URL"),
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
