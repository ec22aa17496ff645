//! Document record types shared by loaders, the vector store, and retrieval

use serde::{Deserialize, Serialize};

/// Supported input kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Plain text file
    Txt,
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Image processed through OCR
    Image,
    /// Scraped web page
    Url,
    /// Unmapped MIME type or extension; callers must reject
    Unsupported,
}

impl SourceType {
    /// Detect source type from a file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => Self::Txt,
            "pdf" => Self::Pdf,
            "docx" | "doc" => Self::Docx,
            "png" | "jpg" | "jpeg" => Self::Image,
            _ => Self::Unsupported,
        }
    }

    /// Check if this is a supported input kind
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Short lowercase name, as stored in the `type` payload field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Image => "image",
            Self::Url => "url",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chunk of extracted text with its provenance.
///
/// This is both the uniform loader output and the projection stored in the
/// vector database. `chunk_index` is zero-based and contiguous within one
/// source document; uniqueness is per-document, not global.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    /// Chunk text content
    pub text: String,
    /// Originating file path or URL
    pub source: String,
    /// Document title (filename or page title)
    pub title: String,
    /// Input kind the record came from
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Zero-based position within the originating document
    pub chunk_index: i64,
}

impl DocumentRecord {
    /// Create a new record
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
        source_type: SourceType,
        chunk_index: i64,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            title: title.into(),
            source_type,
            chunk_index,
        }
    }
}

/// A stored record returned from similarity search, with its score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// The retrieved record
    #[serde(flatten)]
    pub record: DocumentRecord,
    /// Cosine similarity to the query (higher is more similar)
    pub similarity: f32,
}
