//! Format-specific document loaders
//!
//! Each loader turns one input into paragraph-level [`DocumentRecord`]s.
//! The registry maps input kinds to loaders and treats an unavailable
//! loader (missing system dependency) as a first-class state so the rest
//! of the pipeline can report it instead of failing mid-ingest.

mod docx;
mod image;
mod pdf;
mod txt;
mod url;

pub use docx::DocxLoader;
pub use image::ImageLoader;
pub use pdf::PdfLoader;
pub use txt::TxtLoader;
pub use url::UrlLoader;

use std::fmt;

use async_trait::async_trait;
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{DocumentRecord, SourceType};

/// Common interface for format loaders
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Extract paragraph records from one input (path or URL)
    async fn load(&self, input: &str) -> Result<Vec<DocumentRecord>>;

    /// Loader name for logs and availability errors
    fn name(&self) -> &str;
}

/// Split extracted text into non-empty paragraph records.
///
/// Paragraphs are separated by blank lines. Line endings are normalized
/// first so CRLF input produces the same records as LF input.
pub(crate) fn paragraphs_to_records(
    text: &str,
    source: &str,
    title: &str,
    source_type: SourceType,
) -> Vec<DocumentRecord> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(i, p)| DocumentRecord::new(p, source, title, source_type, i as i64))
        .collect()
}

/// Derive a display title from a path-like input
pub(crate) fn title_from_path(input: &str) -> String {
    std::path::Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(input)
        .to_string()
}

enum Slot {
    Available(Box<dyn DocumentLoader>),
    Unavailable { name: &'static str, reason: String },
}

/// Maps detected input kinds to loaders.
///
/// Optional loaders register as `Unavailable` with the probe failure
/// reason; asking for one yields [`Error::LoaderUnavailable`] rather
/// than a generic failure.
pub struct LoaderRegistry {
    txt: Slot,
    pdf: Slot,
    docx: Slot,
    image: Slot,
    url: Slot,
}

impl LoaderRegistry {
    /// Build the registry, probing optional system dependencies
    pub fn new() -> Self {
        let image = match ImageLoader::new() {
            Ok(loader) => Slot::Available(Box::new(loader)),
            Err(e) => {
                warn!("image loader unavailable: {e}");
                let reason = match e {
                    Error::LoaderUnavailable { reason, .. } => reason,
                    other => other.to_string(),
                };
                Slot::Unavailable {
                    name: "image",
                    reason,
                }
            }
        };

        Self {
            txt: Slot::Available(Box::new(TxtLoader)),
            pdf: Slot::Available(Box::new(PdfLoader)),
            docx: Slot::Available(Box::new(DocxLoader)),
            image,
            url: Slot::Available(Box::new(UrlLoader::new())),
        }
    }

    /// Look up the loader for a detected kind.
    ///
    /// `Unsupported` maps to [`Error::UnsupportedInputType`]; a known
    /// kind whose loader failed its availability probe maps to
    /// [`Error::LoaderUnavailable`].
    pub fn get(&self, kind: SourceType) -> Result<&dyn DocumentLoader> {
        let slot = match kind {
            SourceType::Txt => &self.txt,
            SourceType::Pdf => &self.pdf,
            SourceType::Docx => &self.docx,
            SourceType::Image => &self.image,
            SourceType::Url => &self.url,
            SourceType::Unsupported => {
                return Err(Error::UnsupportedInputType(kind.to_string()))
            }
        };

        match slot {
            Slot::Available(loader) => Ok(loader.as_ref()),
            Slot::Unavailable { name, reason } => Err(Error::LoaderUnavailable {
                kind: name.to_string(),
                reason: reason.clone(),
            }),
        }
    }

    /// Whether the loader for a kind is registered and available
    pub fn is_available(&self, kind: SourceType) -> bool {
        self.get(kind).is_ok()
    }

    /// Names of kinds whose loaders are currently available
    pub fn available_kinds(&self) -> Vec<&'static str> {
        [
            (SourceType::Txt, "txt"),
            (SourceType::Pdf, "pdf"),
            (SourceType::Docx, "docx"),
            (SourceType::Image, "image"),
            (SourceType::Url, "url"),
        ]
        .into_iter()
        .filter(|(kind, _)| self.is_available(*kind))
        .map(|(_, name)| name)
        .collect()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("available", &self.available_kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let text = "First paragraph.\n\nSecond paragraph\nwith a wrapped line.\n\n\nThird.";
        let records = paragraphs_to_records(text, "a.txt", "a", SourceType::Txt);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "First paragraph.");
        assert_eq!(records[1].text, "Second paragraph\nwith a wrapped line.");
        assert_eq!(records[2].text, "Third.");
        assert_eq!(records[2].chunk_index, 2);
    }

    #[test]
    fn test_crlf_normalized() {
        let records =
            paragraphs_to_records("one\r\n\r\ntwo", "a.txt", "a", SourceType::Txt);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text, "two");
    }

    #[test]
    fn test_whitespace_only_paragraphs_dropped() {
        let records =
            paragraphs_to_records("  \n\n one \n\n\t\n\n", "a.txt", "a", SourceType::Txt);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "one");
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path("/data/reports/q3-summary.pdf"), "q3-summary");
        assert_eq!(title_from_path("notes.txt"), "notes");
    }

    #[test]
    fn test_registry_rejects_unsupported() {
        let registry = LoaderRegistry::new();
        let result = registry.get(SourceType::Unsupported);
        assert!(matches!(result, Err(Error::UnsupportedInputType(_))));
    }

    #[test]
    fn test_registry_core_loaders_available() {
        let registry = LoaderRegistry::new();
        assert!(registry.is_available(SourceType::Txt));
        assert!(registry.is_available(SourceType::Pdf));
        assert!(registry.is_available(SourceType::Docx));
        assert!(registry.is_available(SourceType::Url));
    }
}
