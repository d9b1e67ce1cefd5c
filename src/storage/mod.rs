//! Storage module for uploaded documents and generated audio
//!
//! Both live in flat local directories keyed by generated names.

mod file_store;

pub use file_store::FileStore;
