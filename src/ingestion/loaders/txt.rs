//! Plain-text loader

use async_trait::async_trait;

use super::{paragraphs_to_records, title_from_path, DocumentLoader};
use crate::error::Result;
use crate::types::{DocumentRecord, SourceType};

/// Reads UTF-8 text files, tolerating invalid byte sequences
pub struct TxtLoader;

#[async_trait]
impl DocumentLoader for TxtLoader {
    async fn load(&self, input: &str) -> Result<Vec<DocumentRecord>> {
        let bytes = tokio::fs::read(input).await?;
        let text = String::from_utf8_lossy(&bytes);
        let title = title_from_path(input);
        Ok(paragraphs_to_records(&text, input, &title, SourceType::Txt))
    }

    fn name(&self) -> &str {
        "txt"
    }
}
