//! Axum route handlers for the Evaluation API.

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::models::Evaluation;
use crate::extraction::UploadedDocument;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Multipart form shared by both endpoints: a `resume` file part and a
/// `job_description` text part. Unknown parts are ignored.
#[derive(Debug, Default)]
pub struct EvaluationForm {
    pub resume: Option<UploadedDocument>,
    pub job_description: Option<String>,
}

impl EvaluationForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = EvaluationForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("resume") => {
                    let file_name = field
                        .file_name()
                        .map(str::to_string)
                        .ok_or_else(|| {
                            AppError::Validation("resume must be uploaded as a file".to_string())
                        })?;
                    let bytes = field.bytes().await?;
                    form.resume = Some(UploadedDocument::new(file_name, bytes));
                }
                Some("job_description") => {
                    form.job_description = Some(field.text().await?);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    fn require_resume(&mut self) -> Result<UploadedDocument, AppError> {
        self.resume
            .take()
            .ok_or_else(|| AppError::Validation("resume file is required".to_string()))
    }

    fn job_description(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .map(str::trim)
            .filter(|jd| !jd.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluation_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub provider: String,
    pub model: String,
    pub evaluation: Evaluation,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluations
///
/// Evaluates an uploaded resume (PDF or DOCX) against a pasted job description.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluateResponse>, AppError> {
    let mut form = EvaluationForm::from_multipart(multipart).await?;
    let document = form.require_resume()?;
    let job_description = form
        .job_description()
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;

    let evaluation_id = Uuid::new_v4();
    info!(
        "Evaluation {evaluation_id}: {} ({} bytes)",
        document.file_name,
        document.bytes.len()
    );

    let evaluation = state
        .evaluator
        .evaluate(document, job_description)
        .await?;

    Ok(Json(EvaluateResponse {
        evaluation_id,
        evaluated_at: Utc::now(),
        provider: state.evaluator.provider_name().to_string(),
        model: state.evaluator.model().to_string(),
        evaluation,
    }))
}

/// POST /api/v1/evaluations/score
///
/// Legacy score-only contract. The job description is optional.
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let mut form = EvaluationForm::from_multipart(multipart).await?;
    let document = form.require_resume()?;

    let score = state
        .evaluator
        .score_only(document, form.job_description())
        .await?;

    Ok(Json(ScoreResponse { score }))
}
