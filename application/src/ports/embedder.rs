//! Embedding service port.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the embedding service
#[derive(Error, Debug)]
pub enum EmbedderError {
    #[error("Embedding request failed: {0}")]
    RequestFailed(String),

    #[error("Embedding response parse error: {0}")]
    ResponseParse(String),
}

/// Port for turning text into embedding vectors.
///
/// Batch embedding is used at index-build time (one call per batch of
/// chunks); single-query embedding at retrieval time.
#[async_trait]
pub trait EmbedderPort: Send + Sync {
    /// Embed a batch of texts, preserving order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError>;

    /// Embed a single query string.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbedderError>;
}
