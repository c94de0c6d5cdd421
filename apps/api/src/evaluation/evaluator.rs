//! Evaluator — runs one resume through extraction, prompt, model call and parse.
//!
//! Strictly one document in, one result out. No retries, no caching, nothing
//! shared between calls except the immutable provider handle and config.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::evaluation::models::{Evaluation, EvaluationError};
use crate::evaluation::parser::{parse_evaluation, parse_score_line};
use crate::evaluation::prompts::{build_evaluation_prompt, build_score_prompt};
use crate::extraction::{extract_text, UploadedDocument};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PLAIN_ANSWER_SYSTEM};
use crate::llm_client::CompletionProvider;

#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub model: String,
    /// Upper bound on a single model call.
    pub timeout: Duration,
}

pub struct Evaluator {
    provider: Arc<dyn CompletionProvider>,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: EvaluatorConfig) -> Self {
        Self { provider, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Full structured evaluation of a resume against a job description.
    pub async fn evaluate(
        &self,
        document: UploadedDocument,
        job_description: &str,
    ) -> Result<Evaluation, EvaluationError> {
        let resume_text = self.extract(document).await?;
        let prompt = build_evaluation_prompt(&resume_text, job_description);
        let raw_text = self.complete(&prompt, JSON_ONLY_SYSTEM).await?;

        let evaluation = parse_evaluation(&raw_text)?;
        info!(
            "Evaluation complete: score={} verdict={:?}",
            evaluation.score, evaluation.verdict
        );
        Ok(evaluation)
    }

    /// Legacy score-only contract. A reply without a score line yields 0.
    pub async fn score_only(
        &self,
        document: UploadedDocument,
        job_description: Option<&str>,
    ) -> Result<u8, EvaluationError> {
        let resume_text = self.extract(document).await?;
        let prompt = build_score_prompt(&resume_text, job_description);
        let raw_text = self.complete(&prompt, PLAIN_ANSWER_SYSTEM).await?;
        Ok(parse_score_line(&raw_text))
    }

    async fn extract(&self, document: UploadedDocument) -> Result<String, EvaluationError> {
        let file_name = document.file_name.clone();

        // PDF/DOCX decoding is CPU-bound.
        let text = tokio::task::spawn_blocking(move || extract_text(&document))
            .await
            .unwrap_or_else(|e| {
                warn!("Extraction task for {file_name} failed: {e}");
                String::new()
            });

        if text.is_empty() {
            return Err(EvaluationError::Extraction { file_name });
        }
        Ok(text)
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, EvaluationError> {
        info!(
            "Calling {} (model: {}, prompt: {} chars)",
            self.provider.name(),
            self.config.model,
            prompt.len()
        );

        let call = self.provider.complete(&self.config.model, prompt, system);
        match tokio::time::timeout(self.config.timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(
                    "{} call exceeded {}s",
                    self.provider.name(),
                    self.config.timeout.as_secs()
                );
                Err(EvaluationError::Timeout {
                    after: self.config.timeout,
                })
            }
        }
    }
}
