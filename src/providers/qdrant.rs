//! Qdrant vector store gateway
//!
//! Talks to a Qdrant server over its REST API. The collection schema
//! mirrors the payload fields of [`DocumentRecord`] with a cosine HNSW
//! index over fixed-width vectors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use super::VectorStore;
use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::types::{DocumentRecord, ScoredRecord};

/// Payload field caps, matching the collection schema
const MAX_TEXT_CHARS: usize = 4096;
const MAX_TYPE_CHARS: usize = 50;
const MAX_TITLE_CHARS: usize = 300;
const MAX_SOURCE_CHARS: usize = 1000;

#[derive(Serialize)]
struct PointStruct {
    id: String,
    vector: Vec<f32>,
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    score: f32,
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct CountResponse {
    result: CountResult,
}

#[derive(Deserialize)]
struct CountResult {
    count: u64,
}

pub struct QdrantStore {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    dimensions: usize,
    hnsw_m: usize,
    hnsw_ef_construction: usize,
}

impl QdrantStore {
    pub fn new(config: &VectorDbConfig, dimensions: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url(),
            collection: config.collection.clone(),
            dimensions,
            hnsw_m: config.hnsw_m,
            hnsw_ef_construction: config.hnsw_ef_construction,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    fn db_err(context: &str, e: impl std::fmt::Display) -> Error {
        Error::VectorDb(format!("{context}: {e}"))
    }

    /// Truncate a string to a maximum number of characters without
    /// splitting a multibyte character
    fn truncate_chars(s: &str, max: usize) -> String {
        if s.chars().count() <= max {
            return s.to_string();
        }
        s.chars().take(max).collect()
    }

    fn record_payload(record: &DocumentRecord) -> serde_json::Value {
        json!({
            "text": Self::truncate_chars(&record.text, MAX_TEXT_CHARS),
            "type": Self::truncate_chars(record.source_type.as_str(), MAX_TYPE_CHARS),
            "title": Self::truncate_chars(&record.title, MAX_TITLE_CHARS),
            "source": Self::truncate_chars(&record.source, MAX_SOURCE_CHARS),
            "chunk_index": record.chunk_index,
        })
    }

    async fn check_status(response: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::VectorDb(format!("{context} returned {status}: {body}")))
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(&self) -> Result<()> {
        let probe = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| Self::db_err("qdrant unreachable", e))?;

        if probe.status().is_success() {
            debug!("collection {} already exists", self.collection);
            return Ok(());
        }

        let body = json!({
            "vectors": {
                "size": self.dimensions,
                "distance": "Cosine",
            },
            "hnsw_config": {
                "m": self.hnsw_m,
                "ef_construct": self.hnsw_ef_construction,
            },
        });

        let response = self
            .client
            .put(self.collection_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::db_err("create collection", e))?;

        Self::check_status(response, "create collection").await?;
        info!(
            "created collection {} ({} dims, cosine)",
            self.collection, self.dimensions
        );
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
        if records.is_empty() {
            return Ok(0);
        }

        let points: Vec<PointStruct> = records
            .iter()
            .zip(embeddings.iter())
            .map(|(record, embedding)| PointStruct {
                id: Uuid::new_v4().to_string(),
                vector: embedding.clone(),
                payload: Self::record_payload(record),
            })
            .collect();

        let count = points.len();
        let url = format!("{}/points?wait=true", self.collection_url());
        let response = self
            .client
            .put(&url)
            .json(&json!({ "points": points }))
            .send()
            .await
            .map_err(|e| Self::db_err("insert points", e))?;

        Self::check_status(response, "insert points").await?;
        debug!("inserted {count} points into {}", self.collection);
        Ok(count)
    }

    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredRecord>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let url = format!("{}/points/search", self.collection_url());
        let body = json!({
            "vector": embedding,
            "limit": k,
            "with_payload": true,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::db_err("search", e))?;
        let response = Self::check_status(response, "search").await?;

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| Self::db_err("bad search response", e))?;

        let mut out = Vec::with_capacity(parsed.result.len());
        for hit in parsed.result {
            let record: DocumentRecord = serde_json::from_value(hit.payload)
                .map_err(|e| Self::db_err("bad point payload", e))?;
            out.push(ScoredRecord {
                record,
                similarity: hit.score,
            });
        }
        Ok(out)
    }

    async fn count(&self) -> Result<u64> {
        let url = format!("{}/points/count", self.collection_url());
        let response = self
            .client
            .post(&url)
            .json(&json!({ "exact": true }))
            .send()
            .await
            .map_err(|e| Self::db_err("count", e))?;

        // a missing collection counts as empty
        if response.status().as_u16() == 404 {
            return Ok(0);
        }
        let response = Self::check_status(response, "count").await?;

        let parsed: CountResponse = response
            .json()
            .await
            .map_err(|e| Self::db_err("bad count response", e))?;
        Ok(parsed.result.count)
    }

    async fn drop_collection(&self) -> Result<()> {
        let response = self
            .client
            .delete(self.collection_url())
            .send()
            .await
            .map_err(|e| Self::db_err("drop collection", e))?;

        // dropping an absent collection is not an error
        if response.status().as_u16() == 404 {
            return Ok(());
        }
        Self::check_status(response, "drop collection").await?;
        info!("dropped collection {}", self.collection);
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/collections", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::db_err("qdrant unreachable", e))?;
        Self::check_status(response, "collections").await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}
