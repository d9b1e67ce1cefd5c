//! PDF Narrator Server Library
//!
//! Upload a PDF, pull the text of a page range, summarize it with a remote
//! model and read it aloud with a local speech engine.
//!
//! # Modules
//!
//! - `pdf`: Page counting and page-range text extraction
//! - `summarize`: Prompting a remote text-generation model
//! - `tts`: Local speech synthesis to audio files
//! - `routes`: HTTP endpoints wiring the above together

pub mod config;
pub mod error;
pub mod naming;
pub mod pdf;
pub mod routes;
pub mod state;
pub mod storage;
pub mod summarize;
pub mod tts;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config().server.max_upload_bytes;

    Router::new()
        .merge(routes::health::router())
        .merge(routes::documents::router())
        .merge(routes::summarize::router())
        .merge(routes::speech::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
