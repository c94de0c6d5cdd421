use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::evaluation::models::EvaluationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload error: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details): (StatusCode, &str, String, Option<Value>) =
            match &self {
                AppError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
                }
                AppError::Multipart(e) => {
                    let status = e.status();
                    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                        "PAYLOAD_TOO_LARGE"
                    } else {
                        "INVALID_UPLOAD"
                    };
                    (status, code, e.body_text(), None)
                }
                AppError::Evaluation(EvaluationError::Extraction { .. }) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILURE",
                    self.to_string(),
                    None,
                ),
                AppError::Evaluation(EvaluationError::LlmCall(e)) => {
                    tracing::error!("LLM call failed: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "LLM_CALL_FAILURE",
                        e.summary().to_string(),
                        None,
                    )
                }
                AppError::Evaluation(EvaluationError::Timeout { .. }) => {
                    tracing::error!("{self}");
                    (
                        StatusCode::GATEWAY_TIMEOUT,
                        "LLM_TIMEOUT",
                        "The AI service did not answer in time".to_string(),
                        None,
                    )
                }
                AppError::Evaluation(EvaluationError::Parse { reason, raw_text }) => {
                    tracing::error!("Unparseable model reply: {reason}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PARSE_FAILURE",
                        "The AI response could not be read as an evaluation".to_string(),
                        Some(json!({
                            "reason": reason,
                            "raw_response": raw_text,
                        })),
                    )
                }
            };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
