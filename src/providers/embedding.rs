//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Text embedding backend
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving order. An empty batch yields
    /// an empty result without touching the backend.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    /// Output vector width
    fn dimensions(&self) -> usize;

    /// Probe whether the backend is reachable and the model loaded
    async fn health_check(&self) -> Result<()>;

    fn name(&self) -> &str;
}
