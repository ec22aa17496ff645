//! Configuration for the RAG system

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main RAG system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Vector database configuration
    #[serde(default)]
    pub vector_db: VectorDbConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file: {}", e)))
    }

    /// Build configuration from defaults with environment overrides.
    ///
    /// Read once at startup: EMBEDDING_MODEL, VECTOR_DB_HOST, VECTOR_DB_PORT,
    /// VECTOR_DB_COLLECTION, LLM_BASE_URL, LLM_API_KEY, LLM_MODEL,
    /// SERVER_HOST, SERVER_PORT.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embeddings.model = model;
        }
        if let Ok(host) = std::env::var("VECTOR_DB_HOST") {
            config.vector_db.host = host;
        }
        if let Ok(port) = std::env::var("VECTOR_DB_PORT") {
            if let Ok(port) = port.parse() {
                config.vector_db.port = port;
            }
        }
        if let Ok(name) = std::env::var("VECTOR_DB_COLLECTION") {
            config.vector_db.collection = name;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.llm.model = model;
        }
        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }

        config
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ollama base URL for the embedding backend
    pub base_url: String,
    /// Embedding model name (all-minilm produces 384-dim vectors)
    pub model: String,
    /// Embedding dimensions (must match the model)
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "all-minilm".to_string(),
            dimensions: 384,
            timeout_secs: 60,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Overlap between chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 600,
            chunk_overlap: 100,
        }
    }
}

/// LLM configuration (OpenAI-compatible chat completions API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the chat completions API
    pub base_url: String,
    /// API key (None for unauthenticated local servers)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model id
    pub model: String,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://integrate.api.nvidia.com/v1".to_string(),
            api_key: None,
            model: "meta/llama-3.2-3b-instruct".to_string(),
            max_tokens: 512,
            timeout_secs: 120,
        }
    }
}

/// Vector database (Qdrant) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Host of the Qdrant server
    pub host: String,
    /// REST port of the Qdrant server
    pub port: u16,
    /// Collection name
    pub collection: String,
    /// HNSW M parameter (connections per layer)
    pub hnsw_m: usize,
    /// HNSW ef_construction parameter
    pub hnsw_ef_construction: usize,
}

impl VectorDbConfig {
    /// REST endpoint base URL
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6333,
            collection: "knowledge_base_vectors".to_string(),
            hnsw_m: 16,
            hnsw_ef_construction: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.embeddings.dimensions, 384);
        assert_eq!(config.chunking.chunk_size, 600);
        assert_eq!(config.chunking.chunk_overlap, 100);
        assert_eq!(config.vector_db.collection, "knowledge_base_vectors");
    }

    #[test]
    fn test_vector_db_url() {
        let config = VectorDbConfig::default();
        assert_eq!(config.url(), "http://localhost:6333");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = RagConfig::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: RagConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.llm.model, config.llm.model);
    }
}
