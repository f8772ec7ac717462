//! In-memory similarity index over embedded chunks.
//!
//! Construction is the expensive part (one embedding call per chunk), so
//! callers cache the built index keyed on document identity. The index
//! itself is immutable and answers top-K queries deterministically: ties
//! are broken by original chunk order, earlier position first.

/// One chunk of course material together with its embedding vector.
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

impl IndexedChunk {
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            embedding,
        }
    }
}

/// Queryable index over a document's chunks.
#[derive(Debug, Clone, Default)]
pub struct ContextIndex {
    chunks: Vec<IndexedChunk>,
}

impl ContextIndex {
    pub fn new(chunks: Vec<IndexedChunk>) -> Self {
        Self { chunks }
    }

    /// An index with no chunks; every search returns nothing.
    pub fn empty() -> Self {
        Self { chunks: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Return the texts of the `k` chunks most similar to the query
    /// embedding, highest similarity first.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<&str> {
        let mut scored: Vec<(usize, f32)> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| (i, cosine_similarity(query, &chunk.embedding)))
            .collect();

        // Descending by score; equal scores keep original chunk order.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        scored
            .into_iter()
            .take(k)
            .map(|(i, _)| self.chunks[i].text.as_str())
            .collect()
    }
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths or zero-magnitude vectors rather
/// than NaN, so a degenerate embedding never poisons the ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(vectors: &[(&str, Vec<f32>)]) -> ContextIndex {
        ContextIndex::new(
            vectors
                .iter()
                .map(|(t, v)| IndexedChunk::new(*t, v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_search_ranks_by_similarity() {
        let index = index_of(&[
            ("far", vec![0.0, 1.0]),
            ("near", vec![1.0, 0.1]),
            ("exact", vec![1.0, 0.0]),
        ]);
        let results = index.search(&[1.0, 0.0], 2);
        assert_eq!(results, vec!["exact", "near"]);
    }

    #[test]
    fn test_search_ties_keep_original_order() {
        let index = index_of(&[
            ("first", vec![1.0, 0.0]),
            ("second", vec![2.0, 0.0]),
            ("third", vec![1.0, 0.0]),
        ]);
        // All three are colinear with the query: identical similarity.
        let results = index.search(&[3.0, 0.0], 3);
        assert_eq!(results, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_search_k_larger_than_index() {
        let index = index_of(&[("only", vec![1.0])]);
        let results = index.search(&[1.0], 7);
        assert_eq!(results, vec!["only"]);
    }

    #[test]
    fn test_search_empty_index() {
        let index = ContextIndex::empty();
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 2.0], 7).is_empty());
    }
}
