//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::storage::FileStore;
use crate::summarize::Summarizer;
use crate::tts::SpeechSynthesizer;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to create storage directories: {0}")]
    Storage(#[from] std::io::Error),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: FileStore,
    summarizer: Summarizer,
    synthesizer: SpeechSynthesizer,
}

impl AppState {
    /// Create the application state from configuration
    ///
    /// Creates the storage directories. A missing summarization key is not
    /// an error; `/summarize` reports it per request.
    pub async fn new(config: Config) -> Result<Self, StateError> {
        let store = FileStore::from_config(&config.storage);
        let summarizer = Summarizer::from_config(&config.summarizer);
        let synthesizer = SpeechSynthesizer::from_config(&config.speech, store.clone());

        Self::from_parts(config, store, summarizer, synthesizer).await
    }

    /// Create the application state from prebuilt services
    pub async fn from_parts(
        config: Config,
        store: FileStore,
        summarizer: Summarizer,
        synthesizer: SpeechSynthesizer,
    ) -> Result<Self, StateError> {
        store.ensure_dirs().await?;

        if !summarizer.is_configured() {
            tracing::warn!("GOOGLE_API_KEY is not set; /summarize will be unavailable");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                summarizer,
                synthesizer,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the file store
    pub fn store(&self) -> &FileStore {
        &self.inner.store
    }

    /// Get the summarizer
    pub fn summarizer(&self) -> &Summarizer {
        &self.inner.summarizer
    }

    /// Get the speech synthesizer
    pub fn synthesizer(&self) -> &SpeechSynthesizer {
        &self.inner.synthesizer
    }
}
