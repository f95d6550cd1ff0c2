use serde_json::Value;

use crate::cover_letter::prompts::{build_cover_letter_prompt, generation_config};
use crate::errors::AppError;
use crate::llm_client::GeminiClient;

/// Builds the cover-letter prompt and delegates to the provider gateway.
/// The returned JSON is the provider's body, untouched.
pub async fn generate_cover_letter(
    llm: &GeminiClient,
    resume_text: &str,
    job_description: &str,
    tone: &str,
) -> Result<Value, AppError> {
    let prompt = build_cover_letter_prompt(resume_text, job_description, tone);
    let cover_letter = llm.generate(&prompt, &generation_config()).await?;
    Ok(cover_letter)
}
