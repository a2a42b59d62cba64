//! Department classification powered by the Gemini API

pub mod client;
pub mod resolver;

use async_trait::async_trait;
use triage_core::ClassifierError;

pub use client::GeminiClient;
pub use resolver::Resolver;

/// Anything that can answer a classification prompt with free text
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, prompt: &str) -> Result<String, ClassifierError>;
}
