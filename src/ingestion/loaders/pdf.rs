//! PDF loader
//!
//! Primary extraction goes through pdf-extract; when that fails (some
//! generators emit streams it cannot decode) a page-by-page lopdf pass
//! recovers whatever text is still reachable.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{paragraphs_to_records, title_from_path, DocumentLoader};
use crate::error::{Error, Result};
use crate::types::{DocumentRecord, SourceType};

pub struct PdfLoader;

impl PdfLoader {
    fn extract_text(data: &[u8]) -> Result<String> {
        match pdf_extract::extract_text_from_mem(data) {
            Ok(text) if !text.trim().is_empty() => Ok(text),
            Ok(_) => {
                debug!("pdf-extract produced no text, trying lopdf fallback");
                Self::extract_with_lopdf(data)
            }
            Err(e) => {
                warn!("pdf-extract failed ({e}), trying lopdf fallback");
                Self::extract_with_lopdf(data)
            }
        }
    }

    fn extract_with_lopdf(data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::Internal(format!("pdf parse failed: {e}")))?;

        let mut pages_text = Vec::new();
        for (page_num, _) in doc.get_pages() {
            match doc.extract_text(&[page_num]) {
                Ok(text) if !text.trim().is_empty() => pages_text.push(text),
                Ok(_) => {}
                Err(e) => debug!("no text on page {page_num}: {e}"),
            }
        }

        if pages_text.is_empty() {
            return Err(Error::Internal("no extractable text in pdf".to_string()));
        }
        Ok(pages_text.join("\n\n"))
    }
}

#[async_trait]
impl DocumentLoader for PdfLoader {
    async fn load(&self, input: &str) -> Result<Vec<DocumentRecord>> {
        let data = tokio::fs::read(input).await?;
        let path = input.to_string();

        // both extraction backends are CPU-bound and synchronous
        let text = tokio::task::spawn_blocking(move || Self::extract_text(&data))
            .await
            .map_err(|e| Error::Internal(format!("pdf extraction task failed: {e}")))??;

        let title = title_from_path(input);
        Ok(paragraphs_to_records(&text, &path, &title, SourceType::Pdf))
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_is_an_error() {
        let result = PdfLoader::extract_text(b"not a pdf at all");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = PdfLoader.load("/nonexistent/file.pdf").await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
