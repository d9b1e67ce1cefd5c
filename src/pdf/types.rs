//! PDF data types

use std::ops::RangeInclusive;
use std::path::PathBuf;

/// An uploaded PDF kept on disk under its generated name
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// Generated storage name, returned to clients as `server_filename`
    pub name: String,
    pub path: PathBuf,
    /// Page count read at upload time
    pub num_pages: usize,
}

/// A requested page range (1-indexed, inclusive, possibly out of bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: i64,
    pub end: i64,
}

impl PageRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Clamp against a document's page count
    ///
    /// `start` is raised to at least 1 and `end` lowered to at most
    /// `page_count`. Returns `None` when nothing remains.
    pub fn clamp(&self, page_count: usize) -> Option<RangeInclusive<u32>> {
        let last = i64::try_from(page_count).unwrap_or(i64::MAX);
        let start = self.start.max(1);
        let end = self.end.min(last);

        if start > end {
            return None;
        }

        let start = u32::try_from(start).ok()?;
        let end = u32::try_from(end).unwrap_or(u32::MAX);
        Some(start..=end)
    }
}

/// PDF extraction errors
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Failed to open PDF {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
}
