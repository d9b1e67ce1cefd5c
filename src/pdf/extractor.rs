//! PDF text extraction backed by lopdf

use std::path::Path;

use lopdf::Document;

use super::types::{ExtractionError, PageRange};

fn load(path: &Path) -> Result<Document, ExtractionError> {
    Document::load(path).map_err(|source| ExtractionError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Number of pages in the PDF at `path`
pub fn page_count(path: &Path) -> Result<usize, ExtractionError> {
    Ok(load(path)?.get_pages().len())
}

/// Extract the text of an inclusive, 1-indexed page range
///
/// The range is clamped to the document (see [`PageRange::clamp`]); an empty
/// range yields an empty string. A page whose text cannot be extracted
/// contributes nothing instead of failing the whole request.
pub fn extract_text(path: &Path, range: PageRange) -> Result<String, ExtractionError> {
    let document = load(path)?;
    let page_count = document.get_pages().len();

    let Some(pages) = range.clamp(page_count) else {
        tracing::debug!(
            path = %path.display(),
            start = range.start,
            end = range.end,
            page_count,
            "Requested page range is empty after clamping"
        );
        return Ok(String::new());
    };

    let mut text = String::new();
    for page in pages {
        match document.extract_text(&[page]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    page,
                    error = %e,
                    "Page text extraction failed, skipping page"
                );
            }
        }
    }

    Ok(text)
}
