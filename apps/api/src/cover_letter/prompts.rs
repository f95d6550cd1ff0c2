// Prompt constants for cover-letter generation.

use crate::llm_client::GenerationConfig;

/// The résumé summary embedded in the prompt is capped at this many
/// characters to bound prompt size. Deliberate truncation, not a bug.
pub const RESUME_SUMMARY_LIMIT: usize = 1000;

/// Cover-letter request. The truncation marker after `{resume_summary}` is
/// part of the template. Replace `{resume_summary}`, `{job_description}`,
/// and `{tone}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Generate a professional cover letter based on the following information:

RESUME SUMMARY:
{resume_summary}...

TARGET JOB DESCRIPTION:
{job_description}

TONE: {tone}

Please create a compelling cover letter that:
1. Opens with a strong hook related to the specific job
2. Highlights 2-3 most relevant experiences from the resume
3. Shows understanding of the company/role requirements
4. Demonstrates enthusiasm and cultural fit
5. Closes with a strong call to action

Format the cover letter professionally with proper paragraphs.
Keep it concise (250-400 words) and impactful.
Use the {tone} tone throughout.

Generate ONLY the cover letter content, no additional explanations."#;

pub fn build_cover_letter_prompt(resume_text: &str, job_description: &str, tone: &str) -> String {
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{resume_summary}", truncate_resume_summary(resume_text))
        .replace("{job_description}", job_description)
        .replace("{tone}", tone)
}

pub fn generation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.8,
        max_output_tokens: 800,
    }
}

/// First `RESUME_SUMMARY_LIMIT` characters, respecting char boundaries.
fn truncate_resume_summary(text: &str) -> &str {
    match text.char_indices().nth(RESUME_SUMMARY_LIMIT) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_resume_truncated_to_first_1000_chars_plus_marker() {
        // Varied content so substring checks are meaningful.
        let resume: String = (0..5000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let prompt = build_cover_letter_prompt(&resume, "Platform role", "professional");

        let expected = format!("{}...", &resume[..1000]);
        assert!(prompt.contains(&expected), "first 1000 chars plus ellipsis");
        assert!(
            !prompt.contains(&resume[..1001]),
            "nothing past the 1000th character may appear"
        );
    }

    #[test]
    fn test_short_resume_embedded_whole() {
        let prompt = build_cover_letter_prompt("Short resume.", "Platform role", "professional");
        assert!(prompt.contains("RESUME SUMMARY:\nShort resume...."));
    }

    #[test]
    fn test_truncation_respects_multibyte_boundaries() {
        let resume = "é".repeat(2000);
        let prompt = build_cover_letter_prompt(&resume, "Platform role", "professional");
        assert!(prompt.contains(&format!("{}...", "é".repeat(1000))));
    }

    #[test]
    fn test_tone_appears_in_prompt() {
        let prompt = build_cover_letter_prompt("Resume", "Job", "casual");
        assert!(prompt.contains("TONE: casual"));
        assert!(prompt.contains("Use the casual tone throughout."));
    }

    #[test]
    fn test_word_count_instruction_present() {
        let prompt = build_cover_letter_prompt("Resume", "Job", "professional");
        assert!(prompt.contains("250-400 words"));
        assert!(prompt.contains("Generate ONLY the cover letter content"));
    }

    #[test]
    fn test_generation_options() {
        let options = generation_config();
        assert_eq!(options.max_output_tokens, 800);
        assert!((options.temperature - 0.8).abs() < f32::EPSILON);
    }
}
