//! Presentation layer for examforge
//!
//! This crate contains the CLI definition, output formatting, progress
//! reporting, the session cache, and the interactive chat REPL. It is
//! the "external caller" of the generation core: it owns the cached
//! document index, consumes the output stream, splits on the answer-key
//! separator, and detects the error sentinel.

pub mod cache;
pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cache::KeyedCache;
pub use chat::{ChatRepl, DocumentOpener, SessionOptions};
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use output::renderer::render_stream;
pub use progress::reporter::{SimpleProgress, SpinnerReporter};
