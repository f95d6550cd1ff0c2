//! Axum route handler for cover-letter generation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cover_letter::generator::generate_cover_letter;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default = "default_tone")]
    pub tone: String,
}

fn default_tone() -> String {
    "professional".to_string()
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: Value,
}

/// POST /cover-letter/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let cover_letter = generate_cover_letter(
        &state.llm,
        &request.resume_text,
        &request.job_description,
        &request.tone,
    )
    .await
    .map_err(|e| e.prefixed("Cover letter generation failed"))?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}
