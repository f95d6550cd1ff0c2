use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_MODELS;

/// What the provider gateway returns once every candidate model has failed.
///
/// `Mock` degrades to a canned analysis shaped like a real success; `Error`
/// surfaces the failure to the client. Both behaviors existed historically,
/// so the choice is configuration rather than code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustedPolicy {
    Mock,
    Error,
}

impl std::str::FromStr for ExhaustedPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ExhaustedPolicy::Mock),
            "error" => Ok(ExhaustedPolicy::Error),
            other => {
                bail!("invalid PROVIDER_EXHAUSTED_POLICY '{other}' (expected 'mock' or 'error')")
            }
        }
    }
}

/// Application configuration loaded once from environment variables at
/// startup and passed by reference into the components that need it.
/// The Gemini key is deliberately optional: the service boots without it and
/// every provider call fails with an explicit error until it is configured.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_models: Vec<String>,
    pub gemini_timeout_secs: u64,
    pub exhausted_policy: ExhaustedPolicy,
    pub max_upload_mb: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_models: std::env::var("GEMINI_MODELS")
                .map(|v| parse_model_list(&v))
                .unwrap_or_else(|_| DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()),
            gemini_timeout_secs: std::env::var("GEMINI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("GEMINI_TIMEOUT_SECS must be a number of seconds")?,
            exhausted_policy: std::env::var("PROVIDER_EXHAUSTED_POLICY")
                .ok()
                .map(|v| v.parse::<ExhaustedPolicy>())
                .transpose()?
                .unwrap_or(ExhaustedPolicy::Mock),
            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a whole number of megabytes")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_policy_parses_known_values() {
        assert_eq!(
            "mock".parse::<ExhaustedPolicy>().unwrap(),
            ExhaustedPolicy::Mock
        );
        assert_eq!(
            "error".parse::<ExhaustedPolicy>().unwrap(),
            ExhaustedPolicy::Error
        );
        assert_eq!(
            "  Mock ".parse::<ExhaustedPolicy>().unwrap(),
            ExhaustedPolicy::Mock
        );
    }

    #[test]
    fn test_exhausted_policy_rejects_unknown_values() {
        assert!("panic".parse::<ExhaustedPolicy>().is_err());
        assert!("".parse::<ExhaustedPolicy>().is_err());
    }

    #[test]
    fn test_parse_model_list_trims_and_drops_empties() {
        let models = parse_model_list("gemini-1.5-flash, gemini-pro ,,  ");
        assert_eq!(models, vec!["gemini-1.5-flash", "gemini-pro"]);
    }
}
