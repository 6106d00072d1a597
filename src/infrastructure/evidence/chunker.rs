//! Fixed-size text chunking with overlap

use crate::domain::DomainError;

const DEFAULT_CHUNK_SIZE: usize = 800;
const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Splits text into chunks of at most `chunk_size` characters
///
/// Sizes are counted in characters, not bytes, so multi-byte currency symbols
/// never split a chunk mid-character. Chunk ends snap back to the last
/// whitespace when one exists inside the chunk.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for FixedSizeChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl FixedSizeChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, DomainError> {
        if chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }

        if chunk_overlap >= chunk_size {
            return Err(DomainError::validation(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk(&self, content: &str) -> Vec<String> {
        let content = content.trim();
        if content.is_empty() {
            return vec![];
        }

        let chars: Vec<char> = content.chars().collect();
        if chars.len() <= self.chunk_size {
            return vec![content.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let target_end = (start + self.chunk_size).min(chars.len());
            let end = self.find_chunk_end(&chars, start, target_end);

            let chunk: String = chars[start..end].iter().collect();
            let chunk = chunk.trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }

            if end >= chars.len() {
                break;
            }

            start = end.saturating_sub(self.chunk_overlap).max(start + 1);
        }

        chunks
    }

    fn find_chunk_end(&self, chars: &[char], start: usize, target_end: usize) -> usize {
        if target_end >= chars.len() {
            return chars.len();
        }

        chars[start..target_end]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map(|pos| start + pos)
            .filter(|&end| end > start)
            .unwrap_or(target_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content() {
        let chunker = FixedSizeChunker::default();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   \n\t  ").is_empty());
    }

    #[test]
    fn test_small_content() {
        let chunker = FixedSizeChunker::default();
        assert_eq!(chunker.chunk("  Gold | 62450  "), vec!["Gold | 62450"]);
    }

    #[test]
    fn test_multiple_chunks_respect_size_and_words() {
        let chunker = FixedSizeChunker::new(20, 5).unwrap();
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";

        let chunks = chunker.chunk(text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20, "{}", chunk);
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
        }
        assert!(chunks[0].starts_with("alpha"));
        assert!(chunks.last().unwrap().ends_with("kappa"));
    }

    #[test]
    fn test_multibyte_characters() {
        let chunker = FixedSizeChunker::new(4, 1).unwrap();
        let chunks = chunker.chunk("₹₹₹₹₹₹₹₹₹₹");

        assert!(chunks.len() >= 3);
        assert!(chunks.iter().all(|c| c.chars().all(|ch| ch == '₹')));
    }

    #[test]
    fn test_invalid_config() {
        assert!(FixedSizeChunker::new(0, 0).is_err());
        assert!(FixedSizeChunker::new(100, 100).is_err());
    }
}
