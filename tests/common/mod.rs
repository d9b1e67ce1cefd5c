//! Shared test harness: a server over temporary directories with fake
//! summarization and speech backends.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tempfile::TempDir;

use pdf_narrator_server::config::Config;
use pdf_narrator_server::state::AppState;
use pdf_narrator_server::storage::FileStore;
use pdf_narrator_server::summarize::{SummarizeError, Summarizer, TextGenerator};
use pdf_narrator_server::tts::{SpeechEngine, SpeechSynthesizer, SynthesisError, VoiceSettings};

pub const FAKE_WAV: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt fake-audio";

/// Replies with a fixed completion and records prompts
pub struct FakeGenerator {
    reply: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(SummarizeError::Upstream)
    }
}

/// Writes [`FAKE_WAV`], or fails when `broken`
pub struct FakeEngine {
    pub broken: bool,
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
        if self.broken {
            return Err(SynthesisError::EngineFailed {
                status: "exit status: 1".to_string(),
                stderr: "no voices installed".to_string(),
            });
        }
        std::fs::write(output, FAKE_WAV)?;
        Ok(())
    }
}

pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestApp {
    /// App with a working summarizer and speech engine
    pub async fn new() -> Self {
        Self::build(
            Some(Arc::new(FakeGenerator::replying(
                "* The document has three pages.\n* Each page names a letter.\n",
            ))),
            false,
        )
        .await
    }

    pub async fn build(generator: Option<Arc<dyn TextGenerator>>, broken_engine: bool) -> Self {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.storage.upload_dir = dir.path().join("uploads");
        config.storage.audio_dir = dir.path().join("audio_output");

        let store = FileStore::from_config(&config.storage);
        let synthesizer = SpeechSynthesizer::new(
            Arc::new(FakeEngine {
                broken: broken_engine,
            }),
            store.clone(),
            VoiceSettings::default(),
        );

        let state = AppState::from_parts(config, store, Summarizer::new(generator), synthesizer)
            .await
            .unwrap();

        Self { dir, state }
    }

    pub fn router(&self) -> Router {
        pdf_narrator_server::app(self.state.clone())
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    /// Write a PDF fixture into the temp dir (outside the upload directory)
    pub fn fixture(&self, name: &str, pages: &[&str]) -> PathBuf {
        let path = self.dir.path().join(name);
        write_pdf(&path, pages);
        path
    }
}

/// Build a `multipart/form-data` POST to `/upload`
pub fn upload_request(field: &str, file_name: Option<&str>, data: &[u8]) -> Request<Body> {
    let boundary = "narrator-test-boundary";

    let disposition = match file_name {
        Some(name) => format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n",
            field, name
        ),
        None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", field),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n{}\r\n", boundary, disposition).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Write a PDF with one line of text per entry in `pages`
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 18.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
