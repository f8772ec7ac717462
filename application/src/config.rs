//! Application configuration value objects.

use serde::{Deserialize, Serialize};

/// Parameters governing context preparation and retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalParams {
    /// Number of chunks returned per query.
    pub top_k: usize,
    /// Chunk window size in bytes.
    pub chunk_size: usize,
    /// Overlap between adjacent chunks in bytes.
    pub chunk_overlap: usize,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            top_k: 7,
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl RetrievalParams {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RetrievalParams::default();
        assert_eq!(params.top_k, 7);
        assert_eq!(params.chunk_size, 1000);
        assert_eq!(params.chunk_overlap, 200);
    }
}
