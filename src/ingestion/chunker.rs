//! Character-window text chunking with overlap
//!
//! Chunks are verbatim slices of the source text. With overlap 0 the
//! chunks of a record concatenate back to the original text exactly.

use crate::types::DocumentRecord;

/// Splits loaded records into fixed-size overlapping chunks
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: 600,
            overlap: 100,
        }
    }
}

impl TextChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        // overlap >= chunk_size would never advance
        let overlap = overlap.min(chunk_size.saturating_sub(1));
        Self {
            chunk_size: chunk_size.max(1),
            overlap,
        }
    }

    /// Split one text into verbatim character windows
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let chunk: String = chars[start..end].iter().collect();
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }

    /// Chunk all records of one document.
    ///
    /// Incoming chunk indices are discarded; the output carries a fresh
    /// contiguous index 0..n-1 spanning the whole document, so the index
    /// reflects chunk order after splitting rather than loader order.
    pub fn chunk_records(&self, records: Vec<DocumentRecord>) -> Vec<DocumentRecord> {
        let mut out = Vec::new();
        let mut index: i64 = 0;

        for record in records {
            for piece in self.split_text(&record.text) {
                out.push(DocumentRecord {
                    text: piece,
                    source: record.source.clone(),
                    title: record.title.clone(),
                    source_type: record.source_type,
                    chunk_index: index,
                });
                index += 1;
            }
        }

        out
    }
}
