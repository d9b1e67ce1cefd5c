//! Text-to-Speech Module
//!
//! Renders text to audio files with a local synthesis engine.
//!
//! Supports:
//! - eSpeak NG (or any CLI-compatible fork) via [`EspeakEngine`]
//! - Custom engines through the [`SpeechEngine`] trait

mod engine;
mod service;
mod types;

pub use engine::{EspeakEngine, SpeechEngine};
pub use service::SpeechSynthesizer;
pub use types::{StoredAudio, SynthesisError, VoiceSettings};
