use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Hiring recommendation. The wire names are the exact strings the prompt
/// asks the model to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Shortlist,
    Consider,
    #[serde(rename = "Not a Match")]
    NotAMatch,
}

/// The structured record returned by the model for one resume/JD pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 0 – 100
    pub score: u8,
    pub strengths: Vec<String>,
    pub missing_skills: Vec<String>,
    pub verdict: Verdict,
    pub recommendations: Vec<String>,
}

/// Every way a single evaluation can fail. All variants are terminal for the
/// evaluation; nothing is retried.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Could not read resume '{file_name}': unsupported file or no extractable text")]
    Extraction { file_name: String },

    #[error("LLM call failed: {0}")]
    LlmCall(#[from] LlmError),

    #[error("LLM call timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    #[error("Failed to parse evaluation: {reason}")]
    Parse { reason: String, raw_text: String },
}
