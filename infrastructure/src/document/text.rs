//! Plain-text document source.

use examforge_application::ports::document_source::{DocumentSource, ExtractError};
use std::path::{Path, PathBuf};

/// A plain UTF-8 text file on disk (e.g. example questions as `.txt`).
pub struct TextDocument {
    path: PathBuf,
    name: String,
}

impl TextDocument {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

impl DocumentSource for TextDocument {
    fn extract_text(&self) -> Result<String, ExtractError> {
        let text = std::fs::read_to_string(&self.path)
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
