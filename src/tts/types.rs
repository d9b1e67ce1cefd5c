//! TTS Types

use std::path::PathBuf;

use crate::config::SpeechConfig;

/// Voice parameters handed to the engine; `None` keeps the engine default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceSettings {
    pub voice: Option<String>,
    /// Words per minute
    pub rate: Option<u32>,
    /// Engine amplitude
    pub volume: Option<u32>,
}

impl From<&SpeechConfig> for VoiceSettings {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            voice: config.voice.clone(),
            rate: config.rate,
            volume: config.volume,
        }
    }
}

/// A generated audio file
#[derive(Debug, Clone)]
pub struct StoredAudio {
    /// Generated storage name
    pub name: String,
    pub path: PathBuf,
}

impl StoredAudio {
    /// URL path the file is served under
    pub fn url(&self) -> String {
        format!("/audio/{}", self.name)
    }
}

/// Synthesis error types
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("Failed to start speech engine {engine}: {source}")]
    EngineStart {
        engine: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Speech engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Speech engine exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error("Speech synthesis task failed: {0}")]
    Task(String),
}
