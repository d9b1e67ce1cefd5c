//! Configuration management for PDF Narrator Server

use std::env;
use std::path::PathBuf;

use secrecy::SecretString;

/// Default Google Generative Language API base URL
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default summarization model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default request body limit for uploads: 50MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub summarizer: SummarizerConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub audio_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Absent key leaves `/summarize` unavailable
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Engine binary, e.g. `espeak-ng`
    pub engine: String,
    pub voice: Option<String>,
    /// Words per minute
    pub rate: Option<u32>,
    /// Engine amplitude
    pub volume: Option<u32>,
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from("uploads"),
                audio_dir: PathBuf::from("audio_output"),
            },
            summarizer: SummarizerConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            },
            speech: SpeechConfig {
                engine: "espeak-ng".to_string(),
                voice: None,
                rate: None,
                volume: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset keys fall back to [`Config::default`]; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: get("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_or("SERVER_PORT", get("SERVER_PORT"), defaults.server.port)?,
                max_upload_bytes: parse_or(
                    "MAX_UPLOAD_BYTES",
                    get("MAX_UPLOAD_BYTES"),
                    defaults.server.max_upload_bytes,
                )?,
            },
            storage: StorageConfig {
                upload_dir: get("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.upload_dir),
                audio_dir: get("AUDIO_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.audio_dir),
            },
            summarizer: SummarizerConfig {
                api_key: get("GOOGLE_API_KEY").map(SecretString::from),
                model: get("GEMINI_MODEL").unwrap_or(defaults.summarizer.model),
                base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.summarizer.base_url),
            },
            speech: SpeechConfig {
                engine: get("TTS_ENGINE").unwrap_or(defaults.speech.engine),
                voice: get("TTS_VOICE"),
                rate: parse_opt("TTS_RATE", get("TTS_RATE"))?,
                volume: parse_opt("TTS_VOLUME", get("TTS_VOLUME"))?,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    Ok(parse_opt(key, value)?.unwrap_or(default))
}

fn parse_opt<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value: v })
        })
        .transpose()
}
