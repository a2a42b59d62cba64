//! Server configuration

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash-001";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LLM_MAX_OUTPUT_TOKENS: u32 = crate::ai::client::DEFAULT_MAX_OUTPUT_TOKENS;
const DEFAULT_RATE_LIMIT_RPS: u32 = 100;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    /// Absent key disables the model and every request uses the rule table
    pub google_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    /// Generation budget; thinking models spend part of it before answering
    pub llm_max_output_tokens: u32,
    /// Optional JSON file replacing the built-in rule table
    pub rules_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_else(|_| vec!["*".to_string()]),
            rate_limit_rps: parse_var("RATE_LIMIT_RPS").unwrap_or(DEFAULT_RATE_LIMIT_RPS),
            google_api_key: std::env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.into()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.into()),
            llm_timeout: Duration::from_secs(
                parse_var("LLM_TIMEOUT_SECS").unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
            ),
            llm_max_output_tokens: parse_var("LLM_MAX_OUTPUT_TOKENS")
                .unwrap_or(DEFAULT_LLM_MAX_OUTPUT_TOKENS),
            rules_path: std::env::var_os("RULES_PATH").map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: DEFAULT_RATE_LIMIT_RPS,
            google_api_key: None,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            llm_max_output_tokens: DEFAULT_LLM_MAX_OUTPUT_TOKENS,
            rules_path: None,
        }
    }
}

/// Parse a numeric env var, ignoring it when unset or malformed
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(var = name, value = %value, "Ignoring malformed numeric setting");
            None
        }
    }
}

/// Split a comma-separated list, dropping empty entries
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_trims_and_drops_empty() {
        assert_eq!(
            parse_list(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn default_disables_model() {
        let config = Config::default();
        assert!(config.google_api_key.is_none());
        assert_eq!(config.llm_model, "gemini-2.0-flash-001");
        assert_eq!(config.llm_timeout, Duration::from_secs(10));
        assert_eq!(config.llm_max_output_tokens, 256);
    }
}
