//! Analysis orchestration: extraction → prompt construction → provider call.
//!
//! The provider's JSON body is returned to the caller untouched; shaping it
//! for the wire is the handlers' job.

use serde_json::Value;

use crate::analysis::prompts::{build_analysis_prompt, generation_config_for, AnalysisMode};
use crate::errors::AppError;
use crate::extract;
use crate::llm_client::GeminiClient;

pub async fn analyze_text(
    llm: &GeminiClient,
    resume_text: &str,
    job_description: Option<&str>,
    mode: AnalysisMode,
) -> Result<Value, AppError> {
    let prompt = build_analysis_prompt(mode, resume_text, job_description);
    let options = generation_config_for(mode);
    let analysis = llm.generate(&prompt, &options).await?;
    Ok(analysis)
}

/// File-upload path: spool the bytes to request-scoped temp storage, extract
/// text, and hand off to the text path. Whitespace-only extraction is a
/// failure, never an empty success — this check is load-bearing.
pub async fn analyze_file(
    llm: &GeminiClient,
    file_bytes: &[u8],
    filename: &str,
    job_description: Option<&str>,
    mode: AnalysisMode,
) -> Result<Value, AppError> {
    let resume_text = extract::extract_upload(file_bytes, filename)?;

    if resume_text.trim().is_empty() {
        return Err(AppError::EmptyDocument);
    }

    analyze_text(llm, &resume_text, job_description, mode).await
}
