//! Text generation providers
//!
//! Defines the provider trait and the Google Generative Language (Gemini)
//! implementation.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::types::{GenerateContentRequest, GenerateContentResponse, SummarizeError};

/// Text generation provider trait
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Submit a prompt and return the completion text
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError>;
}

/// Google Generative Language API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, model: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model = %self.model, error = %e, "Gemini request failed");
                SummarizeError::Upstream(format!("Failed to call Gemini: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, status = %status, "Gemini returned error");
            return Err(SummarizeError::Upstream(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::Upstream(format!("Failed to parse response: {}", e)))?;

        result
            .text()
            .ok_or_else(|| SummarizeError::Upstream("Gemini response contained no text".to_string()))
    }
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockGenerator {
    pub response: Result<String, String>,
    pub prompts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone().map_err(SummarizeError::Upstream)
    }
}
