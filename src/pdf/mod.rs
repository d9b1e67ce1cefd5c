//! PDF Module
//!
//! Page counting and page-range text extraction for uploaded documents.
//!
//! Parsing is blocking; async callers should go through
//! `tokio::task::spawn_blocking`.

mod extractor;
mod types;

pub use extractor::{extract_text, page_count};
pub use types::{ExtractionError, PageRange, StoredDocument};
