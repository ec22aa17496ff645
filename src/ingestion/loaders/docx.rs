//! DOCX loader

use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use super::{title_from_path, DocumentLoader};
use crate::error::{Error, Result};
use crate::types::{DocumentRecord, SourceType};

/// Extracts paragraph text from Word documents.
///
/// Each non-empty document paragraph becomes one record, matching the
/// document's own structure rather than blank-line splitting.
pub struct DocxLoader;

impl DocxLoader {
    fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>> {
        let docx = docx_rs::read_docx(data)
            .map_err(|e| Error::Internal(format!("docx parse failed: {e}")))?;

        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                let mut text = String::new();
                for pc in &paragraph.children {
                    if let ParagraphChild::Run(run) = pc {
                        for rc in &run.children {
                            if let RunChild::Text(t) = rc {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                let text = text.trim().to_string();
                if !text.is_empty() {
                    paragraphs.push(text);
                }
            }
        }
        Ok(paragraphs)
    }
}

#[async_trait]
impl DocumentLoader for DocxLoader {
    async fn load(&self, input: &str) -> Result<Vec<DocumentRecord>> {
        let data = tokio::fs::read(input).await?;
        let paragraphs = tokio::task::spawn_blocking(move || Self::extract_paragraphs(&data))
            .await
            .map_err(|e| Error::Internal(format!("docx extraction task failed: {e}")))??;

        let title = title_from_path(input);
        Ok(paragraphs
            .into_iter()
            .enumerate()
            .map(|(i, p)| DocumentRecord::new(&p, input, &title, SourceType::Docx, i as i64))
            .collect())
    }

    fn name(&self) -> &str {
        "docx"
    }
}
