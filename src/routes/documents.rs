//! Document routes
//!
//! Endpoints:
//! - POST /upload - Store a PDF and report its page count
//! - POST /text - Extract the text of a page range from a stored PDF

use std::path::Path;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::naming::generate_unique_filename;
use crate::pdf::{self, PageRange, StoredDocument};
use crate::state::AppState;

const UPLOAD_FAILED: &str = "Failed to process uploaded file";
const EXTRACT_FAILED: &str = "Failed to extract text";

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/text", post(extract_text))
}

// ============================================================================
// Upload
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Generated name to pass to `/text`
    pub server_filename: String,
    pub num_pages: usize,
}

impl From<StoredDocument> for UploadResponse {
    fn from(document: StoredDocument) -> Self {
        Self {
            server_filename: document.name,
            num_pages: document.num_pages,
        }
    }
}

/// POST /upload
///
/// Accepts a multipart form with a `file` field holding a `.pdf`.
async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|_| AppError::BadRequest("No file part".to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // Without a filename attribute the part is a plain form value
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        if file_name.is_empty() {
            return Err(AppError::BadRequest("No selected file".to_string()));
        }
        if !is_pdf(&file_name) {
            return Err(AppError::BadRequest(
                "Invalid file type, only PDF allowed".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::internal(UPLOAD_FAILED, e))?;

        let document = store_upload(&state, &file_name, data).await?;

        tracing::info!(
            server_filename = %document.name,
            file_name = %file_name,
            num_pages = document.num_pages,
            "PDF uploaded"
        );

        return Ok(Json(document.into()));
    }

    Err(AppError::BadRequest("No file part".to_string()))
}

/// Write the upload under a generated name and read its page count
///
/// A file that does not parse as a PDF is removed again.
async fn store_upload(state: &AppState, file_name: &str, data: Bytes) -> Result<StoredDocument> {
    let name = generate_unique_filename(Some(file_name));
    let path = state.store().upload_dir().join(&name);

    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| AppError::internal(UPLOAD_FAILED, e))?;

    let count_path = path.clone();
    let counted = tokio::task::spawn_blocking(move || pdf::page_count(&count_path))
        .await
        .map_err(|e| AppError::internal(UPLOAD_FAILED, e))
        .and_then(|result| result.map_err(|e| AppError::internal(UPLOAD_FAILED, e)));

    match counted {
        Ok(num_pages) => Ok(StoredDocument {
            name,
            path,
            num_pages,
        }),
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                tracing::warn!(
                    path = %path.display(),
                    error = %remove_err,
                    "Failed to remove rejected upload"
                );
            }
            Err(e)
        }
    }
}

/// Case-insensitive `.pdf` extension check
fn is_pdf(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

// ============================================================================
// Text extraction
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub server_filename: Option<String>,
    /// Integer or integer string; defaults to 1
    #[serde(default)]
    pub start_page: Option<Value>,
    /// Integer or integer string; defaults to 1
    #[serde(default)]
    pub end_page: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextResponse {
    pub text: String,
}

/// POST /text
///
/// Extracts pages `start_page..=end_page`, clamped to the document.
async fn extract_text(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<TextResponse>> {
    let Json(request) = payload?;

    let invalid_pages = || AppError::BadRequest("Invalid page numbers provided".to_string());
    let start = parse_page_number(request.start_page.as_ref()).ok_or_else(invalid_pages)?;
    let end = parse_page_number(request.end_page.as_ref()).ok_or_else(invalid_pages)?;

    let server_filename = request
        .server_filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing server_filename".to_string()))?;

    let not_found = || AppError::NotFound("PDF file not found on server".to_string());
    let path = state.store().upload_path(&server_filename).ok_or_else(not_found)?;
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(not_found());
    }

    let range = PageRange::new(start, end);
    let text = tokio::task::spawn_blocking(move || pdf::extract_text(&path, range))
        .await
        .map_err(|e| AppError::internal(EXTRACT_FAILED, e))??;

    tracing::debug!(
        server_filename = %server_filename,
        start,
        end,
        text_len = text.len(),
        "Extracted text"
    );

    Ok(Json(TextResponse { text }))
}

/// Parse a page number given as a JSON integer or integer string
///
/// Absent or `null` means page 1.
fn parse_page_number(value: Option<&Value>) -> Option<i64> {
    match value {
        None | Some(Value::Null) => Some(1),
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}
