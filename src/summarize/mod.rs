//! Summarization Module
//!
//! Turns extracted text into a bullet-point summary using a remote
//! text-generation model.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pdf_narrator_server::summarize::{GeminiClient, Summarizer};
//!
//! let summarizer = Summarizer::from_config(&config.summarizer);
//! let summary = summarizer.summarize("Long chapter text...").await?;
//! ```

mod provider;
mod service;
mod types;

pub use provider::{GeminiClient, TextGenerator};
pub use service::{build_prompt, Summarizer};
pub use types::SummarizeError;
