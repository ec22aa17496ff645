//! Response types for the HTTP API

use serde::{Deserialize, Serialize};

use super::document::ScoredRecord;

/// Quality metrics for one generated answer.
///
/// Derived per query, never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AnswerEvaluation {
    /// Max cosine similarity between the query and any retrieved chunk
    pub context_recall: f32,
    /// LLM self-assessment of answer support by the context, in [0, 1]
    pub faithfulness: f32,
    /// Weighted blend scaled to [0, 100]
    pub rag_score: f32,
}

impl AnswerEvaluation {
    /// Weight given to context recall in the blended score
    pub const RECALL_WEIGHT: f32 = 0.6;
    /// Weight given to faithfulness in the blended score
    pub const FAITHFULNESS_WEIGHT: f32 = 0.4;

    /// Blend the two metrics into a [0, 100] score
    pub fn from_metrics(context_recall: f32, faithfulness: f32) -> Self {
        let context_recall = context_recall.clamp(0.0, 1.0);
        let faithfulness = faithfulness.clamp(0.0, 1.0);
        let rag_score =
            100.0 * (Self::RECALL_WEIGHT * context_recall + Self::FAITHFULNESS_WEIGHT * faithfulness);
        Self {
            context_recall,
            faithfulness,
            rag_score,
        }
    }
}

/// Response from the query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer (or the fixed no-context sentinel)
    pub answer: String,
    /// Quality metrics; None when evaluation was skipped or nothing was retrieved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<AnswerEvaluation>,
    /// Retrieved chunks in rank order
    pub retrieved_documents: Vec<ScoredRecord>,
    /// Wall-clock processing time
    pub processing_time_ms: u64,
}

/// Response from the load endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResponse {
    /// Human-readable summary
    pub message: String,
    /// Number of chunks stored in the vector database
    pub chunks_stored: usize,
    /// Per-source errors for batch uploads (empty on full success)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<LoadError>,
}

/// A single failed source within a batch load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadError {
    /// Filename or URL that failed
    pub source: String,
    /// Failure description
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rag_score_bounds() {
        let eval = AnswerEvaluation::from_metrics(1.0, 1.0);
        assert_eq!(eval.rag_score, 100.0);

        let eval = AnswerEvaluation::from_metrics(0.0, 0.0);
        assert_eq!(eval.rag_score, 0.0);

        let eval = AnswerEvaluation::from_metrics(0.5, 0.5);
        assert!((eval.rag_score - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_rag_score_weights() {
        // Recall-only: 100 * 0.6
        let eval = AnswerEvaluation::from_metrics(1.0, 0.0);
        assert!((eval.rag_score - 60.0).abs() < 1e-4);

        // Faithfulness-only: 100 * 0.4
        let eval = AnswerEvaluation::from_metrics(0.0, 1.0);
        assert!((eval.rag_score - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_range_metrics_are_clamped() {
        let eval = AnswerEvaluation::from_metrics(1.5, -0.2);
        assert_eq!(eval.context_recall, 1.0);
        assert_eq!(eval.faithfulness, 0.0);
        assert!(eval.rag_score >= 0.0 && eval.rag_score <= 100.0);
    }
}
