//! Core types for documents, queries, and responses

pub mod document;
pub mod query;
pub mod response;

pub use document::{DocumentRecord, ScoredRecord, SourceType};
pub use query::QueryRequest;
pub use response::{AnswerEvaluation, LoadResponse, QueryResponse};
