//! Infrastructure layer for examforge
//!
//! This crate contains adapters for the application-layer ports:
//! the Gemini LLM gateway and embedder, document text extraction,
//! configuration loading, and the JSONL transcript logger.

pub mod config;
pub mod document;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig, ServiceConfig};
pub use document::{PdfDocument, TextDocument, open_document};
pub use gemini::{GeminiEmbedder, GeminiGateway};
pub use logging::JsonlTranscriptLogger;
