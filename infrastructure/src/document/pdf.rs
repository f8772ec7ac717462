//! PDF document source.

use examforge_application::ports::document_source::{DocumentSource, ExtractError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A PDF file on disk.
///
/// Extraction concatenates page text in original page order.
pub struct PdfDocument {
    path: PathBuf,
    name: String,
}

impl PdfDocument {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

impl DocumentSource for PdfDocument {
    fn extract_text(&self) -> Result<String, ExtractError> {
        debug!("Extracting text from PDF '{}'", self.name);
        let text = pdf_extract::extract_text(&self.path)
            .map_err(|e| ExtractError::Unreadable(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ExtractError::Empty);
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
