//! Prepare Context use case.
//!
//! Turns an uploaded course document into a queryable [`ContextIndex`]:
//! extract text, split into overlapping chunks, embed each chunk.
//! Construction is expensive (one embedding request per batch of
//! chunks), so the caller caches the result keyed on document identity —
//! this use case itself is stateless per call.

use crate::config::RetrievalParams;
use crate::ports::document_source::{DocumentSource, ExtractError};
use crate::ports::embedder::{EmbedderError, EmbedderPort};
use examforge_domain::{Chunker, ContextIndex, IndexedChunk};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while preparing context.
#[derive(Error, Debug)]
pub enum PrepareContextError {
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbedderError),
}

/// Use case for building the similarity index over a course document.
pub struct PrepareContextUseCase {
    embedder: Arc<dyn EmbedderPort>,
    params: RetrievalParams,
}

impl PrepareContextUseCase {
    pub fn new(embedder: Arc<dyn EmbedderPort>) -> Self {
        Self {
            embedder,
            params: RetrievalParams::default(),
        }
    }

    pub fn with_params(mut self, params: RetrievalParams) -> Self {
        self.params = params;
        self
    }

    /// Build the index for the primary course document.
    ///
    /// Extraction failure is fatal here: grounded generation requires
    /// usable source material.
    pub async fn build_index(
        &self,
        source: &dyn DocumentSource,
    ) -> Result<ContextIndex, PrepareContextError> {
        let text = source.extract_text()?;

        let chunker = Chunker::new(self.params.chunk_size, self.params.chunk_overlap);
        let chunks = chunker.chunk(&text);
        if chunks.is_empty() {
            debug!("Document '{}' produced no chunks", source.name());
            return Ok(ContextIndex::empty());
        }

        info!(
            "Embedding {} chunks from '{}'",
            chunks.len(),
            source.name()
        );
        let embeddings = self.embedder.embed(&chunks).await?;
        if embeddings.len() != chunks.len() {
            warn!(
                "Embedder returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            );
        }

        let indexed = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(text, embedding)| IndexedChunk::new(text, embedding))
            .collect();

        Ok(ContextIndex::new(indexed))
    }

    /// Extract example-question text from an optional upload.
    ///
    /// Example text is a non-critical input: extraction failure degrades
    /// to an empty string instead of aborting the run.
    pub fn extract_example_text(source: &dyn DocumentSource) -> String {
        match source.extract_text() {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Could not extract example text from '{}': {}",
                    source.name(),
                    e
                );
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedDocument {
        text: Result<String, ()>,
    }

    impl FixedDocument {
        fn with_text(text: &str) -> Self {
            Self {
                text: Ok(text.to_string()),
            }
        }

        fn unreadable() -> Self {
            Self { text: Err(()) }
        }
    }

    impl DocumentSource for FixedDocument {
        fn extract_text(&self) -> Result<String, ExtractError> {
            self.text
                .clone()
                .map_err(|_| ExtractError::Unreadable("corrupt".to_string()))
        }

        fn name(&self) -> &str {
            "course.pdf"
        }
    }

    struct CountingEmbedder {
        calls: Mutex<usize>,
    }

    impl CountingEmbedder {
        fn new() -> Self {
            Self {
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbedderPort for CountingEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError> {
            *self.calls.lock().unwrap() += 1;
            Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
        }

        async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    #[tokio::test]
    async fn test_build_index_from_short_document() {
        let embedder = Arc::new(CountingEmbedder::new());
        let use_case = PrepareContextUseCase::new(embedder.clone());

        let doc = FixedDocument::with_text("Osmosis moves water across a membrane.");
        let index = use_case.build_index(&doc).await.unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(*embedder.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_build_index_unreadable_document_fails() {
        let use_case = PrepareContextUseCase::new(Arc::new(CountingEmbedder::new()));

        let result = use_case.build_index(&FixedDocument::unreadable()).await;
        assert!(matches!(
            result,
            Err(PrepareContextError::Extraction(ExtractError::Unreadable(_)))
        ));
    }

    #[tokio::test]
    async fn test_build_index_chunks_long_document() {
        let embedder = Arc::new(CountingEmbedder::new());
        let use_case = PrepareContextUseCase::new(embedder.clone())
            .with_params(RetrievalParams {
                top_k: 7,
                chunk_size: 50,
                chunk_overlap: 10,
            });

        let doc = FixedDocument::with_text(&"cells divide by mitosis. ".repeat(20));
        let index = use_case.build_index(&doc).await.unwrap();

        assert!(index.len() > 1);
    }

    #[test]
    fn test_extract_example_text_degrades_to_empty() {
        let text = PrepareContextUseCase::extract_example_text(&FixedDocument::unreadable());
        assert_eq!(text, "");

        let text = PrepareContextUseCase::extract_example_text(&FixedDocument::with_text("Q1."));
        assert_eq!(text, "Q1.");
    }
}
