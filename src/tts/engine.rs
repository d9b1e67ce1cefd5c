//! Speech engines
//!
//! Defines the engine trait and the eSpeak NG command-line implementation.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};

use super::types::{SynthesisError, VoiceSettings};

/// Local speech synthesis engine
///
/// Implementations block until the audio file is fully written.
pub trait SpeechEngine: Send + Sync {
    /// Engine name for logging
    fn name(&self) -> &str;

    /// Extension (without the dot) of the files this engine writes
    fn file_extension(&self) -> &str;

    /// Render `text` into an audio file at `output`
    fn render_to_file(
        &self,
        text: &str,
        output: &Path,
        settings: &VoiceSettings,
    ) -> Result<(), SynthesisError>;
}

/// eSpeak NG engine driven through its command-line interface
///
/// Text is passed on stdin and the engine writes a WAV file.
pub struct EspeakEngine {
    binary: String,
}

impl EspeakEngine {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }

    fn build_args(settings: &VoiceSettings, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        if let Some(voice) = &settings.voice {
            args.push("-v".into());
            args.push(voice.into());
        }
        if let Some(rate) = settings.rate {
            args.push("-s".into());
            args.push(rate.to_string().into());
        }
        if let Some(volume) = settings.volume {
            args.push("-a".into());
            args.push(volume.to_string().into());
        }

        args.push("-w".into());
        args.push(output.as_os_str().to_os_string());
        args.push("--stdin".into());
        args
    }
}

impl Default for EspeakEngine {
    fn default() -> Self {
        Self::new("espeak-ng")
    }
}

impl SpeechEngine for EspeakEngine {
    fn name(&self) -> &str {
        &self.binary
    }

    fn file_extension(&self) -> &str {
        "wav"
    }

    fn render_to_file(
        &self,
        text: &str,
        output: &Path,
        settings: &VoiceSettings,
    ) -> Result<(), SynthesisError> {
        let mut command = Command::new(&self.binary);
        command
            .args(Self::build_args(settings, output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut process = EngineProcess::spawn(&mut command, &self.binary)?;
        process.feed(text)?;
        let result = process.finish()?;

        if !result.status.success() {
            return Err(SynthesisError::EngineFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// A running engine process
///
/// Dropping it before [`EngineProcess::finish`] kills and reaps the process,
/// so an engine is never left running after a failed render.
struct EngineProcess {
    child: Option<Child>,
    engine: String,
}

impl EngineProcess {
    fn spawn(command: &mut Command, engine: &str) -> Result<Self, SynthesisError> {
        let child = command.spawn().map_err(|source| SynthesisError::EngineStart {
            engine: engine.to_string(),
            source,
        })?;

        Ok(Self {
            child: Some(child),
            engine: engine.to_string(),
        })
    }

    /// Write the full text to stdin and close it
    fn feed(&mut self, text: &str) -> Result<(), SynthesisError> {
        let stdin = self.child.as_mut().and_then(|child| child.stdin.take());
        match stdin {
            Some(mut stdin) => match stdin.write_all(text.as_bytes()) {
                // Engine exited early; its exit status explains why
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                result => Ok(result?),
            },
            None => Err(SynthesisError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "engine stdin is not available",
            ))),
        }
    }

    /// Wait for the engine to exit
    fn finish(mut self) -> Result<Output, SynthesisError> {
        match self.child.take() {
            Some(child) => Ok(child.wait_with_output()?),
            None => Err(SynthesisError::Task("engine process already released".to_string())),
        }
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            tracing::warn!(engine = %self.engine, "Speech engine released before completion");
        }
    }
}
