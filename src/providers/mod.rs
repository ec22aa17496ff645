//! Provider traits and backend clients
//!
//! The pipelines talk to embeddings, the LLM, and the vector store
//! through these traits so backends can be swapped (or faked in tests)
//! without touching pipeline code.

pub mod embedding;
pub mod llm;
pub mod vector_store;

mod ollama;
mod openai;
mod qdrant;

pub use embedding::EmbeddingProvider;
pub use llm::{ChatMessage, LlmProvider};
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiLlm;
pub use qdrant::QdrantStore;
pub use vector_store::VectorStore;
