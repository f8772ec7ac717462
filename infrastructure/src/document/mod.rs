//! Document sources: text extraction from uploaded files.

mod pdf;
mod text;

pub use pdf::PdfDocument;
pub use text::TextDocument;

use examforge_application::ports::document_source::DocumentSource;
use std::path::Path;

/// Open a document source appropriate for the file's extension.
///
/// `.pdf` files go through the PDF extractor; everything else is read
/// as plain UTF-8 text.
pub fn open_document(path: &Path) -> Box<dyn DocumentSource> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdfDocument::new(path))
    } else {
        Box::new(TextDocument::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_document_selects_by_extension() {
        let pdf = open_document(Path::new("notes.PDF"));
        assert_eq!(pdf.name(), "notes.PDF");

        let txt = open_document(Path::new("examples.txt"));
        assert_eq!(txt.name(), "examples.txt");
    }
}
