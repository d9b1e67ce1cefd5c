//! Speech Synthesis Service
//!
//! Names the output file, runs the engine on the blocking pool and checks
//! the result.

use std::sync::Arc;

use super::engine::{EspeakEngine, SpeechEngine};
use super::types::{StoredAudio, SynthesisError, VoiceSettings};
use crate::config::SpeechConfig;
use crate::naming::generate_name_with_extension;
use crate::storage::FileStore;

/// Text-to-speech service writing into the store's audio directory
#[derive(Clone)]
pub struct SpeechSynthesizer {
    engine: Arc<dyn SpeechEngine>,
    store: FileStore,
    settings: VoiceSettings,
}

impl SpeechSynthesizer {
    pub fn new(engine: Arc<dyn SpeechEngine>, store: FileStore, settings: VoiceSettings) -> Self {
        Self {
            engine,
            store,
            settings,
        }
    }

    /// eSpeak NG synthesizer from configuration
    pub fn from_config(config: &SpeechConfig, store: FileStore) -> Self {
        Self::new(
            Arc::new(EspeakEngine::new(&config.engine)),
            store,
            VoiceSettings::from(config),
        )
    }

    /// Render `text` to a new audio file
    ///
    /// Blocks a worker thread until the engine finishes. A missing or empty
    /// output file is logged but not treated as a failure.
    pub async fn synthesize(&self, text: &str) -> Result<StoredAudio, SynthesisError> {
        let name = generate_name_with_extension(self.engine.file_extension());
        let path = self.store.audio_dir().join(&name);

        tracing::debug!(
            engine = self.engine.name(),
            file = %name,
            text_len = text.len(),
            "Synthesizing speech"
        );

        let engine = Arc::clone(&self.engine);
        let settings = self.settings.clone();
        let text = text.to_string();
        let output = path.clone();

        tokio::task::spawn_blocking(move || engine.render_to_file(&text, &output, &settings))
            .await
            .map_err(|e| SynthesisError::Task(e.to_string()))??;

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.len() > 0 => {
                tracing::info!(file = %name, size = meta.len(), "Speech synthesized");
            }
            _ => {
                tracing::warn!(
                    path = %path.display(),
                    "TTS output file is missing or empty"
                );
            }
        }

        Ok(StoredAudio { name, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Writes a fixed payload, or nothing
    struct FakeEngine {
        payload: Option<&'static [u8]>,
    }

    impl SpeechEngine for FakeEngine {
        fn name(&self) -> &str {
            "fake"
        }

        fn file_extension(&self) -> &str {
            "wav"
        }

        fn render_to_file(
            &self,
            _text: &str,
            output: &Path,
            _settings: &VoiceSettings,
        ) -> Result<(), SynthesisError> {
            match self.payload {
                Some(bytes) => Ok(std::fs::write(output, bytes)?),
                None => Ok(()),
            }
        }
    }

    struct BrokenEngine;

    impl SpeechEngine for BrokenEngine {
        fn name(&self) -> &str {
            "broken"
        }

        fn file_extension(&self) -> &str {
            "wav"
        }

        fn render_to_file(&self, _: &str, _: &Path, _: &VoiceSettings) -> Result<(), SynthesisError> {
            Err(SynthesisError::EngineFailed {
                status: "exit status: 1".to_string(),
                stderr: "no audio device".to_string(),
            })
        }
    }

    fn synthesizer(dir: &TempDir, engine: Arc<dyn SpeechEngine>) -> SpeechSynthesizer {
        let store = FileStore::new(dir.path().join("uploads"), dir.path());
        SpeechSynthesizer::new(engine, store, VoiceSettings::default())
    }

    #[tokio::test]
    async fn test_synthesize_writes_unique_files() {
        let dir = TempDir::new().unwrap();
        let tts = synthesizer(&dir, Arc::new(FakeEngine { payload: Some(b"RIFF") }));

        let first = tts.synthesize("one").await.unwrap();
        let second = tts.synthesize("two").await.unwrap();

        assert_ne!(first.name, second.name);
        assert!(first.name.ends_with(".wav"));
        assert_eq!(first.path, dir.path().join(&first.name));
        assert_eq!(first.url(), format!("/audio/{}", first.name));
        assert_eq!(std::fs::read(&first.path).unwrap(), b"RIFF");
    }

    #[tokio::test]
    async fn test_empty_output_still_succeeds() {
        let dir = TempDir::new().unwrap();
        let tts = synthesizer(&dir, Arc::new(FakeEngine { payload: None }));

        let audio = tts.synthesize("silence").await.unwrap();
        assert!(!audio.path.exists());
    }

    #[tokio::test]
    async fn test_engine_failure_is_returned() {
        let dir = TempDir::new().unwrap();
        let tts = synthesizer(&dir, Arc::new(BrokenEngine));

        assert!(matches!(
            tts.synthesize("hello").await,
            Err(SynthesisError::EngineFailed { .. })
        ));
    }
}
