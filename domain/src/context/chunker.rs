//! Sliding-window text chunker.
//!
//! Splits course material into overlapping character windows ahead of
//! embedding. Cuts prefer natural boundaries — paragraph break, then
//! sentence end, then whitespace — before falling back to a hard cut, so
//! a concept is rarely severed mid-thought. The overlap guarantees that
//! any span shorter than `chunk_size - overlap` survives intact in at
//! least one chunk.

/// Chunk size (in bytes) used for course material.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Overlap (in bytes) between adjacent chunks.
pub const DEFAULT_OVERLAP: usize = 200;

/// Overlapping fixed-size text splitter.
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
}

impl Chunker {
    /// Create a new Chunker.
    ///
    /// # Panics
    /// Panics if `overlap >= chunk_size` — the window could never advance.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(
            overlap < chunk_size,
            "overlap ({}) must be less than chunk_size ({})",
            overlap,
            chunk_size
        );
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Split text into overlapping chunks.
    ///
    /// Text that fits in a single window is returned unchanged as one
    /// chunk. Empty text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let hard_end = floor_boundary(text, (start + self.chunk_size).min(text.len()));
            let end = if hard_end == text.len() {
                hard_end
            } else {
                self.cut_point(text, start, hard_end)
            };

            chunks.push(text[start..end].to_string());

            if end == text.len() {
                break;
            }

            // Step back by the overlap, but always make forward progress.
            let mut next = end.saturating_sub(self.overlap);
            if next <= start {
                next = start + 1;
            }
            while next < text.len() && !text.is_char_boundary(next) {
                next += 1;
            }
            start = next;
        }

        chunks
    }

    /// Pick the cut position for the window `text[start..hard_end]`.
    ///
    /// Preference order: paragraph break, sentence end, whitespace, hard
    /// cut. A natural break is only taken in the second half of the
    /// window, so chunks never degenerate to fragments.
    fn cut_point(&self, text: &str, start: usize, hard_end: usize) -> usize {
        let window = &text[start..hard_end];
        let min_cut = self.chunk_size / 2;

        // Paragraph break: cut after the blank line.
        if let Some(pos) = window.rfind("\n\n") {
            let cut = pos + 2;
            if cut >= min_cut {
                return start + cut;
            }
        }

        // Sentence end: cut after the terminal punctuation.
        if let Some(pos) = last_sentence_end(window) {
            let cut = pos + 1;
            if cut >= min_cut {
                return start + cut;
            }
        }

        // Word boundary: cut after the last whitespace character.
        if let Some(pos) = window.rfind(char::is_whitespace) {
            let ws_len = window[pos..].chars().next().map_or(1, char::len_utf8);
            let cut = pos + ws_len;
            if cut >= min_cut {
                return start + cut;
            }
        }

        hard_end
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP)
    }
}

/// Byte index of the last sentence-terminating punctuation that is
/// followed by whitespace (or ends the window).
fn last_sentence_end(window: &str) -> Option<usize> {
    let bytes = window.as_bytes();
    (0..bytes.len())
        .rev()
        .find(|&i| {
            matches!(bytes[i], b'.' | b'!' | b'?')
                && bytes
                    .get(i + 1)
                    .is_none_or(|&next| next.is_ascii_whitespace())
        })
}

/// Largest char boundary not exceeding `i`.
fn floor_boundary(text: &str, mut i: usize) -> usize {
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_gives_no_chunks() {
        let chunks = Chunker::new(100, 20).chunk("");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let text = "Osmosis moves water across a membrane.";
        let chunks = Chunker::new(1000, 200).chunk(text);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let text = "lorem ipsum dolor sit amet ".repeat(100);
        let chunker = Chunker::new(100, 20);
        for chunk in chunker.chunk(&text) {
            assert!(chunk.len() <= 100, "chunk too long: {}", chunk.len());
        }
    }

    #[test]
    fn test_adjacent_chunks_overlap() {
        let text = "word ".repeat(500);
        let chunks = Chunker::new(100, 20).chunk(&text);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            // The next chunk starts `overlap` bytes before this one ends
            let head: String = pair[1].chars().take(5).collect();
            assert!(pair[0].contains(&head));
        }
    }

    #[test]
    fn test_prefers_paragraph_break() {
        let text = format!("{}\n\n{}", "a".repeat(60), "b".repeat(100));
        let chunks = Chunker::new(100, 10).chunk(&text);
        assert!(chunks[0].ends_with("\n\n"));
        assert!(chunks[1].contains('b'));
    }

    #[test]
    fn test_prefers_sentence_end_without_paragraphs() {
        let text = "This is a sentence about cells. ".repeat(20);
        let chunks = Chunker::new(100, 20).chunk(&text);
        assert!(chunks[0].trim_end().ends_with('.'));
    }

    #[test]
    fn test_full_coverage_of_source() {
        let text = "alpha beta gamma delta ".repeat(80);
        let chunks = Chunker::new(120, 30).chunk(&text);
        assert!(text.starts_with(chunks.first().unwrap()));
        assert!(text.ends_with(chunks.last().unwrap().as_str()));
    }

    #[test]
    fn test_multibyte_text_cuts_on_char_boundaries() {
        let text = "日本語のテキストです。".repeat(50);
        let chunks = Chunker::new(100, 20).chunk(&text);
        // Reaching here without a panic means every cut hit a boundary;
        // also verify nothing was lost at the tail.
        assert!(text.ends_with(chunks.last().unwrap().as_str()));
    }

    #[test]
    #[should_panic]
    fn test_overlap_must_be_less_than_chunk_size() {
        let _ = Chunker::new(50, 50);
    }
}
