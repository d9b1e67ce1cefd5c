//! Summarization Service
//!
//! Wraps text in the summary prompt and forwards it to the configured provider.

use std::sync::Arc;

use super::provider::{GeminiClient, TextGenerator};
use super::types::SummarizeError;
use crate::config::SummarizerConfig;

/// Build the point-wise summary prompt for `text`
pub fn build_prompt(text: &str) -> String {
    format!(
        "Summarize the following text point-wise in Markdown format.\n\
         Each main point should start with '* '.\n\
         Ensure the summary is concise, well-structured, and covers the key information.\n\
         Do not include any introductory or concluding phrases like \"Here is the summary:\".\n\
         \n\
         Text to summarize:\n\
         ---\n\
         {}\n\
         ---\n\
         Summary:\n",
        text
    )
}

/// Summarizer over an optional provider
///
/// Without a provider (no API key) every call fails with
/// [`SummarizeError::NotConfigured`].
#[derive(Clone)]
pub struct Summarizer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Summarizer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Summarizer that always reports the service as unconfigured
    pub fn unconfigured() -> Self {
        Self { generator: None }
    }

    /// Build from configuration, using Gemini when an API key is present
    pub fn from_config(config: &SummarizerConfig) -> Self {
        let generator = config.api_key.clone().map(|key| {
            Arc::new(GeminiClient::new(key, &config.model, &config.base_url))
                as Arc<dyn TextGenerator>
        });
        Self { generator }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Summarize `text` as a Markdown bullet list
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let generator = self.generator.as_ref().ok_or(SummarizeError::NotConfigured)?;

        let prompt = build_prompt(text);

        tracing::debug!(
            provider = generator.name(),
            text_len = text.len(),
            "Requesting summary"
        );

        let summary = generator.generate(&prompt).await?;
        Ok(summary.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::provider::MockGenerator;
    use secrecy::SecretString;

    #[test]
    fn test_prompt_wraps_text() {
        let prompt = build_prompt("The quick brown fox.");

        assert!(prompt.starts_with("Summarize the following text point-wise in Markdown format."));
        assert!(prompt.contains("Each main point should start with '* '."));
        assert!(prompt.contains("---\nThe quick brown fox.\n---\nSummary:"));
    }

    #[tokio::test]
    async fn test_unconfigured_fails_before_calling_provider() {
        let summarizer = Summarizer::unconfigured();

        assert!(!summarizer.is_configured());
        assert!(matches!(
            summarizer.summarize("text").await,
            Err(SummarizeError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_summary_is_trimmed_and_prompt_forwarded() {
        let mock = Arc::new(MockGenerator::replying("\n\n* first\n* second  \n"));
        let summarizer = Summarizer::new(Some(mock.clone() as Arc<dyn TextGenerator>));

        let summary = summarizer.summarize("Chapter text").await.unwrap();
        assert_eq!(summary, "* first\n* second");

        let prompts = mock.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], build_prompt("Chapter text"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_propagated() {
        let summarizer = Summarizer::new(Some(Arc::new(MockGenerator::failing("quota exceeded"))));

        match summarizer.summarize("text").await {
            Err(SummarizeError::Upstream(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = crate::config::Config::default().summarizer;
        assert!(!Summarizer::from_config(&config).is_configured());

        config.api_key = Some(SecretString::from("key".to_string()));
        assert!(Summarizer::from_config(&config).is_configured());
    }
}
