//! Route modules for PDF Narrator Server

pub mod documents;
pub mod health;
pub mod speech;
pub mod summarize;
