//! Speech routes
//!
//! Endpoints:
//! - POST /tts - Render text to a new audio file
//! - GET /audio/:filename - Serve a generated audio file

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the speech router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tts", post(text_to_speech))
        .route("/audio/:filename", get(serve_audio))
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TtsResponse {
    /// Always `"completed"`; synthesis finishes before the response
    pub status: String,
    pub audio_url: String,
}

/// POST /tts
async fn text_to_speech(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<TtsResponse>> {
    let Json(request) = payload?;
    let text = request
        .text
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AppError::BadRequest("No text provided for TTS".to_string()))?;

    let audio = state.synthesizer().synthesize(&text).await?;

    Ok(Json(TtsResponse {
        status: "completed".to_string(),
        audio_url: audio.url(),
    }))
}

/// GET /audio/:filename
async fn serve_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let not_found = || AppError::NotFound("Audio file not found".to_string());
    let path = state.store().audio_path(&filename).ok_or_else(not_found)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(AppError::internal("Failed to read audio file", e)),
    };

    let content_type = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();
    let size = bytes.len();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", filename),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::internal("Failed to build audio response", e))
}
