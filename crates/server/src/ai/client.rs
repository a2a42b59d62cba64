//! Gemini API client for the Google Generative Language `generateContent` API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use triage_core::ClassifierError;

use super::Classifier;
use crate::config::Config;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Room for thinking-capable models to reason before naming a department
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 256;

/// Client for the Gemini `generateContent` API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_output_tokens: u32,
}

/// A content entry in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Individual part within a content entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Request body for `generateContent`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

/// Response from `generateContent`
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

/// Error detail from the API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    /// Create a client against `base_url` (no trailing path)
    pub fn new(api_key: String, base_url: &str, model: &str) -> Result<Self, ClassifierError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }

    /// Cap on generated tokens, including any the model spends thinking
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens.max(1);
        self
    }

    /// Create a client from server configuration, if an API key is present
    pub fn from_config(config: &Config) -> Result<Option<Self>, ClassifierError> {
        config
            .google_api_key
            .as_ref()
            .map(|key| {
                Self::new(key.clone(), &config.llm_base_url, &config.llm_model)
                    .map(|client| client.with_max_output_tokens(config.llm_max_output_tokens))
            })
            .transpose()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send a single user prompt and return the raw API response
    pub async fn send(&self, prompt: &str) -> Result<ApiResponse, ClassifierError> {
        let request = ApiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiError>(&body) {
                Ok(api_err) => api_err.error.message,
                Err(_) => body,
            };
            return Err(ClassifierError::Api { status, message });
        }

        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| ClassifierError::Decode(e.to_string()))
    }

    /// Extract the first text part of the first candidate
    pub fn extract_text(response: &ApiResponse) -> Result<String, ClassifierError> {
        response
            .candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.clone())
            .ok_or(ClassifierError::EmptyResponse)
    }
}

#[async_trait]
impl Classifier for GeminiClient {
    async fn classify(&self, prompt: &str) -> Result<String, ClassifierError> {
        let response = self.send(prompt).await?;
        Self::extract_text(&response)
    }
}
