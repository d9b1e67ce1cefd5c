//! Summarization route
//!
//! POST /summarize - Summarize text as a Markdown bullet list

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::summarize::SummarizeError;

/// Create the summarize router
pub fn router() -> Router<AppState> {
    Router::new().route("/summarize", post(summarize))
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// POST /summarize
async fn summarize(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>> {
    let summarizer = state.summarizer();

    // Reported before the body is looked at
    if !summarizer.is_configured() {
        return Err(SummarizeError::NotConfigured.into());
    }

    let Json(request) = payload?;
    let text = request
        .text
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AppError::BadRequest("No text provided for summarization".to_string()))?;

    let summary = summarizer.summarize(&text).await?;

    tracing::info!(
        text_len = text.len(),
        summary_len = summary.len(),
        "Summary generated"
    );

    Ok(Json(SummarizeResponse { summary }))
}
