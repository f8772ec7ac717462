//! Document source port.

use thiserror::Error;

/// Errors raised while extracting text from a source document.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Document is unreadable: {0}")]
    Unreadable(String),

    #[error("Document contains no extractable text")]
    Empty,
}

/// Any source that can yield the plain text of a document.
///
/// The call-site decides the failure policy: example-text extraction
/// degrades to an empty string, while primary-context extraction halts
/// grounded generation — that mode requires usable source material.
pub trait DocumentSource: Send + Sync {
    /// Extract all text, page by page, in original order.
    fn extract_text(&self) -> Result<String, ExtractError>;

    /// A human-readable name for the source (e.g. the file name).
    fn name(&self) -> &str;
}
