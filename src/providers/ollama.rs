//! Ollama embedding backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EmbeddingProvider;
use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Embedding client for an Ollama server.
///
/// Each instance owns its own HTTP client so ingestion and evaluation
/// can run against separate embedder instances.
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::ModelUnavailable(format!("ollama unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ModelUnavailable(format!(
                "ollama embeddings returned {status}: {body}"
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::ModelUnavailable(format!("bad embeddings response: {e}")))?;

        if parsed.embedding.len() != self.dimensions {
            return Err(Error::ModelUnavailable(format!(
                "model '{}' returned {} dimensions, expected {}",
                self.model,
                parsed.embedding.len(),
                self.dimensions
            )));
        }

        Ok(parsed.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ModelUnavailable(format!("ollama unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::ModelUnavailable(format!(
                "ollama tags returned {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| Error::ModelUnavailable(format!("bad tags response: {e}")))?;

        let model_present = tags
            .models
            .iter()
            .any(|m| m.name == self.model || m.name.starts_with(&format!("{}:", self.model)));
        if !model_present {
            return Err(Error::ModelUnavailable(format!(
                "model '{}' not loaded in ollama",
                self.model
            )));
        }

        debug!("ollama embedder healthy, model {} present", self.model);
        Ok(())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = EmbeddingConfig::default();
        config.base_url = "http://localhost:11434/".to_string();
        let embedder = OllamaEmbedder::new(&config);
        assert_eq!(embedder.base_url, "http://localhost:11434");
        assert_eq!(embedder.dimensions(), 384);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_model_unavailable() {
        let mut config = EmbeddingConfig::default();
        config.base_url = "http://127.0.0.1:1".to_string();
        config.timeout_secs = 1;
        let embedder = OllamaEmbedder::new(&config);
        let err = embedder.embed("hello").await.unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }
}
