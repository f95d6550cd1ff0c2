//! Axum route handlers for the résumé analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::analysis::analyzer::{analyze_file, analyze_text};
use crate::analysis::prompts::AnalysisMode;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub mode: AnalysisMode,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: Value,
}

/// POST /resume/analyze
///
/// Analyzes raw résumé text and returns the provider's JSON verbatim under
/// `analysis`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let analysis = analyze_text(&state.llm, &request.text, None, request.mode)
        .await
        .map_err(|e| e.prefixed("Analysis failed"))?;

    Ok(Json(AnalyzeResponse { analysis }))
}

struct UploadedFile {
    filename: String,
    content: Bytes,
}

/// POST /resume/analyze-file
///
/// Multipart upload: `file` (required) plus an optional `job_description`
/// used to tailor the analysis.
pub async fn handle_analyze_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    let (file, job_description) = read_upload(multipart).await.map_err(|e| {
        error!(request_id = %request_id, error = %e, "failed to read upload");
        e
    })?;

    info!(
        request_id = %request_id,
        file_name = %file.filename,
        file_size = file.content.len(),
        has_job_description = job_description.is_some(),
        "starting file analysis"
    );

    let analysis = analyze_file(
        &state.llm,
        &file.content,
        &file.filename,
        job_description.as_deref(),
        AnalysisMode::Structured,
    )
    .await
    .map_err(|e| e.prefixed("File analysis failed"))?;

    info!(request_id = %request_id, "file analysis completed");

    Ok(Json(AnalyzeResponse { analysis }))
}

async fn read_upload(
    mut multipart: Multipart,
) -> Result<(UploadedFile, Option<String>), AppError> {
    let mut file: Option<UploadedFile> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::Validation(format!("Failed to read multipart field: {e}"))
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read file data: {e}"))
                })?;
                file = Some(UploadedFile { filename, content });
            }
            "job_description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job_description: {e}"))
                })?;
                job_description = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("missing `file` field".to_string()))?;
    Ok((file, job_description))
}
