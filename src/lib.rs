//! knowledge-rag: retrieval-augmented generation over a multi-format knowledge base
//!
//! This crate ingests documents (plain text, PDF, DOCX, images via OCR, or
//! scraped web pages), chunks and embeds them, stores the vectors in a
//! Qdrant collection, and answers questions by retrieving the most similar
//! chunks and conditioning an LLM answer on them. An optional evaluation
//! step scores each answer on retrieval quality and faithfulness.
//!
//! Caller contract: all vectors in one collection must come from the same
//! embedding model. Mixing models across ingest and query is not guarded
//! against and silently corrupts similarity ranking.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod rag;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    document::{DocumentRecord, SourceType},
    query::QueryRequest,
    response::{AnswerEvaluation, QueryResponse},
};
