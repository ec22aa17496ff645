//! Vector store trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DocumentRecord, ScoredRecord};

/// Vector similarity store
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection and index if they do not exist yet.
    /// Safe to call repeatedly.
    async fn ensure_collection(&self) -> Result<()>;

    /// Insert records with their embeddings, returning the stored count.
    /// Record and embedding counts must match; a mismatch fails before
    /// any network traffic.
    async fn insert(
        &self,
        records: &[DocumentRecord],
        embeddings: &[Vec<f32>],
    ) -> Result<usize>;

    /// Cosine similarity search. `k == 0` returns an empty result
    /// without touching the backend; `k` larger than the stored count
    /// returns everything stored.
    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredRecord>>;

    /// Number of stored vectors
    async fn count(&self) -> Result<u64>;

    /// Drop the collection and everything in it
    async fn drop_collection(&self) -> Result<()>;

    /// Probe whether the backend is reachable
    async fn health_check(&self) -> Result<()>;

    fn name(&self) -> &str;
}
