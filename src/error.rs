//! Error types for the RAG system

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for ingestion, storage, and generation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input path or URL maps to no known loader
    #[error("unsupported input type: {0}")]
    UnsupportedInputType(String),

    /// A loader exists for the input kind but its backing tool is missing
    #[error("loader unavailable for '{kind}': {reason}")]
    LoaderUnavailable { kind: String, reason: String },

    /// Chunk/embedding cardinality mismatch at insert time
    #[error("arity mismatch: {records} records but {embeddings} embeddings")]
    ArityMismatch { records: usize, embeddings: usize },

    /// Network failure reading a URL
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Embedding or LLM backend unreachable
    #[error("model backend unavailable: {0}")]
    ModelUnavailable(String),

    /// Vector database error
    #[error("vector db error: {0}")]
    VectorDb(String),

    /// LLM API error
    #[error("llm error: {0}")]
    Llm(String),

    /// Malformed or empty client request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a loader-unavailable error
    pub fn loader_unavailable(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoaderUnavailable {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a fetch error
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::UnsupportedInputType(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::LoaderUnavailable { .. } => StatusCode::NOT_IMPLEMENTED,
            Error::ArityMismatch { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Fetch { .. } => StatusCode::BAD_GATEWAY,
            Error::ModelUnavailable(_) | Error::VectorDb(_) | Error::Llm(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Io(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_mismatch_message() {
        let err = Error::ArityMismatch {
            records: 3,
            embeddings: 2,
        };
        assert_eq!(
            err.to_string(),
            "arity mismatch: 3 records but 2 embeddings"
        );
    }

    #[test]
    fn test_invalid_request_is_client_error() {
        let response =
            Error::InvalidRequest("no files in upload".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_fetch_shorthand() {
        let err = Error::fetch("http://example.com", "timed out");
        assert!(matches!(err, Error::Fetch { .. }));
        assert!(err.to_string().contains("http://example.com"));
    }
}
