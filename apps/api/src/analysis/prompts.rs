// Prompt constants for résumé analysis. Templates are fixed; the résumé
// slot may already be a composite of résumé + job description (the merge
// happens before template substitution).

use serde::{Deserialize, Serialize};

use crate::llm_client::GenerationConfig;

/// Which analysis template to run. `Structured` demands the sectioned ATS
/// layout; `Plain` asks for free-form feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Plain,
    #[default]
    Structured,
}

/// Free-form feedback request. Replace `{resume_text}` before sending.
pub const PLAIN_ANALYSIS_TEMPLATE: &str = r#"Analyze this resume and provide feedback:

{resume_text}

Please provide:
1. Overall score (1-10)
2. Key strengths
3. Areas for improvement
4. Missing keywords"#;

/// Structured ATS analysis request. Replace `{resume_text}` before sending.
pub const STRUCTURED_ANALYSIS_TEMPLATE: &str = r#"Analyze this resume and provide detailed feedback in a structured format:

RESUME CONTENT:
{resume_text}

Please provide your analysis in the following structure:

**ATS COMPATIBILITY SCORE: X/100**

**OVERALL ASSESSMENT:**
- Overall Rating: X/10
- Key Strengths: (3-4 bullet points)
- Critical Issues: (2-3 bullet points)

**SKILLS ANALYSIS:**
- Technical Skills Found: (list)
- Missing Industry Keywords: (list)
- Recommended Skills to Add: (list)

**CONTENT OPTIMIZATION:**
- Sections Needing Improvement: (list)
- Quantifiable Achievements: (mention if missing)
- Action Verbs Usage: (rate and suggest)

**ATS OPTIMIZATION:**
- File Format Compatibility: (assess)
- Keyword Density: (rate)
- Section Headers: (assess standard format)
- Contact Information: (completeness)

**RECOMMENDATIONS:**
1. Top Priority Fix:
2. Quick Wins: (3 items)
3. Long-term Improvements: (2 items)

Provide specific, actionable feedback that helps improve job application success rates."#;

/// Wraps the résumé with the target job description so the analysis is
/// tailored to that job. Replace `{resume_text}` and `{job_description}`.
pub const JOB_TAILORING_TEMPLATE: &str = r#"Resume:
{resume_text}

Target Job:
{job_description}

Analyze specifically for this job."#;

/// Builds the full analysis prompt. A present job description is merged
/// into the résumé slot first, then the mode's template is substituted.
pub fn build_analysis_prompt(
    mode: AnalysisMode,
    resume_text: &str,
    job_description: Option<&str>,
) -> String {
    let resume_slot = match job_description {
        Some(jd) => JOB_TAILORING_TEMPLATE
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", jd),
        None => resume_text.to_string(),
    };

    let template = match mode {
        AnalysisMode::Plain => PLAIN_ANALYSIS_TEMPLATE,
        AnalysisMode::Structured => STRUCTURED_ANALYSIS_TEMPLATE,
    };
    template.replace("{resume_text}", &resume_slot)
}

/// Sampling options are fixed per template kind, not user-configurable.
pub fn generation_config_for(mode: AnalysisMode) -> GenerationConfig {
    match mode {
        AnalysisMode::Plain => GenerationConfig {
            temperature: 0.7,
            max_output_tokens: 1000,
        },
        AnalysisMode::Structured => GenerationConfig {
            temperature: 0.7,
            max_output_tokens: 1500,
        },
    }
}
