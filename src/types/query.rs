//! Query and load request types

use serde::{Deserialize, Serialize};

/// Query request for RAG search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub question: String,

    /// Number of chunks to retrieve (default: 3)
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Compute the answer quality score (default: true)
    #[serde(default = "default_evaluate")]
    pub evaluate: bool,
}

fn default_top_k() -> usize {
    3
}

fn default_evaluate() -> bool {
    true
}

impl QueryRequest {
    /// Create a new query with default options
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: default_top_k(),
            evaluate: default_evaluate(),
        }
    }

    /// Set the number of chunks to retrieve
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Disable answer evaluation
    pub fn without_evaluation(mut self) -> Self {
        self.evaluate = false;
        self
    }
}

/// Request body for loading a URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadUrlRequest {
    /// The URL to scrape and ingest
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_from_json() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question": "what is rust?"}"#).unwrap();
        assert_eq!(request.top_k, 3);
        assert!(request.evaluate);
    }

    #[test]
    fn test_query_overrides() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question": "q", "top_k": 7, "evaluate": false}"#)
                .unwrap();
        assert_eq!(request.top_k, 7);
        assert!(!request.evaluate);
    }
}
