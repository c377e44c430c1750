//! Axum route handler for the Evaluation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::evaluation::extractor::extract_resume_text;
use crate::evaluation::normalizer::normalize_reply;
use crate::evaluation::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::state::AppState;

/// POST /evaluate
///
/// Multipart form: file part `resume` (PDF) and text field `jd`.
/// Extracts the resume text, asks the model for a match assessment, and
/// returns the normalized report.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut jd = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                resume = Some((filename, field.bytes().await?));
            }
            "jd" => jd = field.text().await?,
            _ => {}
        }
    }

    // Validation order is part of the contract: file presence, then filename,
    // then job description — all before any extraction or model call.
    let (filename, data) = resume.ok_or(AppError::MissingResume)?;
    if filename.is_empty() {
        return Err(AppError::EmptyFilename);
    }
    if jd.is_empty() {
        return Err(AppError::MissingJobDescription);
    }

    let resume_text = extract_resume_text(&data).map_err(|e| AppError::Unexpected(e.to_string()))?;
    debug!(
        "extracted {} chars of resume text from {filename}",
        resume_text.len()
    );

    let prompt = EVALUATION_PROMPT_TEMPLATE
        .replace("{text}", &resume_text)
        .replace("{jd}", &jd);

    let reply = state
        .llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Unexpected(e.to_string()))?;

    let report = normalize_reply(&reply)?;
    info!("evaluation completed for {filename}");

    Ok(Json(Value::Object(report)))
}
