//! Application state for the RAG server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::ingestion::{IngestPipeline, TextChunker};
use crate::providers::{
    EmbeddingProvider, LlmProvider, OllamaEmbedder, OpenAiLlm, QdrantStore, VectorStore,
};
use crate::rag::RagPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Embedding provider shared by ingestion and query embedding
    embedder: Arc<dyn EmbeddingProvider>,
    /// Dedicated embedding provider for answer evaluation
    eval_embedder: Arc<dyn EmbeddingProvider>,
    /// Chat completion provider
    llm: Arc<dyn LlmProvider>,
    /// Vector store gateway
    store: Arc<dyn VectorStore>,
    /// Ingestion pipeline
    ingest: IngestPipeline,
    /// Query pipeline
    rag: RagPipeline,
}

impl AppState {
    /// Wire up providers and pipelines from configuration
    pub fn new(config: RagConfig) -> Self {
        tracing::info!("Initializing RAG application state...");

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OllamaEmbedder::new(&config.embeddings));
        // separate instance so evaluation holds its own connections
        let eval_embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OllamaEmbedder::new(&config.embeddings));
        let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiLlm::new(&config.llm));
        let store: Arc<dyn VectorStore> = Arc::new(QdrantStore::new(
            &config.vector_db,
            config.embeddings.dimensions,
        ));

        let chunker = TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap);
        let ingest = IngestPipeline::new(chunker, embedder.clone(), store.clone());
        let rag = RagPipeline::new(
            embedder.clone(),
            eval_embedder.clone(),
            llm.clone(),
            store.clone(),
            config.llm.max_tokens,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                eval_embedder,
                llm,
                store,
                ingest,
                rag,
            }),
        }
    }

    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    pub fn eval_embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.eval_embedder
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.inner.store
    }

    pub fn ingest(&self) -> &IngestPipeline {
        &self.inner.ingest
    }

    pub fn rag(&self) -> &RagPipeline {
        &self.inner.rag
    }

    /// Probe the embedding and vector store backends.
    ///
    /// The LLM is not probed; it may be a metered remote API.
    pub async fn check_backends(&self) -> Result<()> {
        self.inner.embedder.health_check().await?;
        self.inner.store.health_check().await?;
        Ok(())
    }
}
