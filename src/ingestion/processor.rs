//! End-to-end ingestion: detect, load, chunk, embed, store

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::ingestion::chunker::TextChunker;
use crate::ingestion::detector::detect_input;
use crate::ingestion::loaders::{title_from_path, LoaderRegistry};
use crate::providers::{EmbeddingProvider, VectorStore};

/// Drives one input through the full ingestion sequence
pub struct IngestPipeline {
    registry: LoaderRegistry,
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl IngestPipeline {
    pub fn new(
        chunker: TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            registry: LoaderRegistry::new(),
            chunker,
            embedder,
            store,
        }
    }

    pub fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    /// Ingest one path or URL, returning the number of chunks stored
    pub async fn ingest(&self, input: &str) -> Result<usize> {
        self.ingest_with_name(input, None).await
    }

    /// Ingest with a display name overriding the on-disk path.
    ///
    /// Uploaded files land in temp storage; the override keeps the
    /// caller's original filename as the stored source and title.
    pub async fn ingest_with_name(
        &self,
        input: &str,
        display_name: Option<&str>,
    ) -> Result<usize> {
        let kind = detect_input(input);
        let loader = self.registry.get(kind)?;

        let mut records = loader.load(input).await?;
        if records.is_empty() {
            warn!("no content extracted from {input}");
            return Ok(0);
        }

        if let Some(name) = display_name {
            let title = title_from_path(name);
            for record in &mut records {
                record.source = name.to_string();
                record.title = title.clone();
            }
        }

        let chunks = self.chunker.chunk_records(records);
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        self.store.ensure_collection().await?;
        let stored = self.store.insert(&chunks, &embeddings).await?;
        info!("ingested {input}: {stored} chunks stored");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::Error;
    use crate::types::{DocumentRecord, ScoredRecord};

    struct FakeEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32, 1.0])
        }

        fn dimensions(&self) -> usize {
            2
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    #[derive(Default)]
    struct FakeStore {
        inserted: Mutex<Vec<DocumentRecord>>,
    }

    #[async_trait]
    impl VectorStore for FakeStore {
        async fn ensure_collection(&self) -> Result<()> {
            Ok(())
        }

        async fn insert(
            &self,
            records: &[DocumentRecord],
            embeddings: &[Vec<f32>],
        ) -> Result<usize> {
            if records.len() != embeddings.len() {
                return Err(Error::ArityMismatch {
                    records: records.len(),
                    embeddings: embeddings.len(),
                });
            }
            self.inserted.lock().unwrap().extend_from_slice(records);
            Ok(records.len())
        }

        async fn search(&self, _embedding: &[f32], _k: usize) -> Result<Vec<ScoredRecord>> {
            Ok(Vec::new())
        }

        async fn count(&self) -> Result<u64> {
            Ok(self.inserted.lock().unwrap().len() as u64)
        }

        async fn drop_collection(&self) -> Result<()> {
            self.inserted.lock().unwrap().clear();
            Ok(())
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    fn pipeline(store: Arc<FakeStore>) -> IngestPipeline {
        IngestPipeline::new(TextChunker::new(20, 0), Arc::new(FakeEmbedder), store)
    }

    #[tokio::test]
    async fn test_ingest_txt_stores_chunks() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(
            file,
            "First paragraph with enough text to split.\n\nSecond paragraph."
        )
        .unwrap();

        let store = Arc::new(FakeStore::default());
        let stored = pipeline(store.clone())
            .ingest(file.path().to_str().unwrap())
            .await
            .unwrap();

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(stored, inserted.len());
        assert!(stored >= 2);
        // indices are contiguous across the whole document
        for (i, record) in inserted.iter().enumerate() {
            assert_eq!(record.chunk_index, i as i64);
        }
    }

    #[tokio::test]
    async fn test_ingest_unknown_kind_is_rejected() {
        let file = tempfile::Builder::new().suffix(".xyz").tempfile().unwrap();
        let store = Arc::new(FakeStore::default());
        let err = pipeline(store)
            .ingest(file.path().to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedInputType(_)));
    }

    #[tokio::test]
    async fn test_ingest_empty_file_stores_nothing() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let store = Arc::new(FakeStore::default());
        let stored = pipeline(store.clone())
            .ingest(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(stored, 0);
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_display_name_overrides_source() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Uploaded content paragraph.").unwrap();

        let store = Arc::new(FakeStore::default());
        pipeline(store.clone())
            .ingest_with_name(file.path().to_str().unwrap(), Some("report.txt"))
            .await
            .unwrap();

        let inserted = store.inserted.lock().unwrap();
        assert!(inserted.iter().all(|r| r.source == "report.txt"));
        assert!(inserted.iter().all(|r| r.title == "report"));
    }
}
