//! Query-time RAG orchestration

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::providers::{EmbeddingProvider, LlmProvider, VectorStore};
use crate::rag::eval::Evaluator;
use crate::rag::prompt::{PromptBuilder, NO_CONTEXT_ANSWER};
use crate::types::{QueryRequest, QueryResponse};

/// Answers questions against the stored knowledge base.
///
/// Holds two embedder instances: one shared with ingestion for query
/// embedding, one dedicated to evaluation so recall scoring never
/// contends with ingest traffic.
pub struct RagPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    eval_embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn VectorStore>,
    max_tokens: u32,
}

impl RagPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        eval_embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
        max_tokens: u32,
    ) -> Self {
        Self {
            embedder,
            eval_embedder,
            llm,
            store,
            max_tokens,
        }
    }

    /// Run one query end to end.
    ///
    /// Zero retrieval short-circuits with the fixed sentinel answer;
    /// the LLM is not called and no evaluation is produced.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let start = Instant::now();

        let query_embedding = self.embedder.embed(&request.question).await?;
        let retrieved = self.store.search(&query_embedding, request.top_k).await?;
        debug!(
            "retrieved {} chunks for top_k {}",
            retrieved.len(),
            request.top_k
        );

        if retrieved.is_empty() {
            info!("no relevant chunks found, returning sentinel answer");
            return Ok(QueryResponse {
                answer: NO_CONTEXT_ANSWER.to_string(),
                evaluation: None,
                retrieved_documents: Vec::new(),
                processing_time_ms: start.elapsed().as_millis() as u64,
            });
        }

        let context = PromptBuilder::build_context(&retrieved);
        let messages = PromptBuilder::answer_messages(&context, &request.question);
        let answer = self.llm.complete(&messages, self.max_tokens).await?;

        let evaluation = if request.evaluate {
            let chunk_texts: Vec<String> = retrieved
                .iter()
                .map(|r| r.record.text.clone())
                .collect();
            let evaluator = Evaluator {
                embedder: self.eval_embedder.as_ref(),
                llm: self.llm.as_ref(),
            };
            let metrics = evaluator
                .evaluate(&request.question, &chunk_texts, &context, &answer)
                .await?;
            Some(metrics)
        } else {
            None
        };

        Ok(QueryResponse {
            answer,
            evaluation,
            retrieved_documents: retrieved,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::providers::ChatMessage;
    use crate::types::{DocumentRecord, ScoredRecord, SourceType};

    struct FakeEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            // direction varies with content so cosine scores differ
            let x = text.len() as f32;
            Ok(vec![x, 1.0])
        }

        fn dimensions(&self) -> usize {
            2
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    #[derive(Default)]
    struct CountingLlm {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for CountingLlm {
        async fn complete(&self, messages: &[ChatMessage], _max_tokens: u32) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // first call answers, second call grades
            if messages[0].content.contains("grade") {
                Ok("0.8".to_string())
            } else {
                Ok("A generated answer.".to_string())
            }
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct FixedStore {
        hits: Vec<ScoredRecord>,
    }

    #[async_trait]
    impl VectorStore for FixedStore {
        async fn ensure_collection(&self) -> Result<()> {
            Ok(())
        }

        async fn insert(
            &self,
            records: &[DocumentRecord],
            _embeddings: &[Vec<f32>],
        ) -> Result<usize> {
            Ok(records.len())
        }

        async fn search(&self, _embedding: &[f32], k: usize) -> Result<Vec<ScoredRecord>> {
            Ok(self.hits.iter().take(k).cloned().collect())
        }

        async fn count(&self) -> Result<u64> {
            Ok(self.hits.len() as u64)
        }

        async fn drop_collection(&self) -> Result<()> {
            Ok(())
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn scored(text: &str, similarity: f32) -> ScoredRecord {
        ScoredRecord {
            record: DocumentRecord::new(text, "a.txt", "a", SourceType::Txt, 0),
            similarity,
        }
    }

    fn pipeline(hits: Vec<ScoredRecord>, llm: Arc<CountingLlm>) -> RagPipeline {
        RagPipeline::new(
            Arc::new(FakeEmbedder),
            Arc::new(FakeEmbedder),
            llm,
            Arc::new(FixedStore { hits }),
            512,
        )
    }

    #[tokio::test]
    async fn test_zero_retrieval_returns_sentinel_without_llm() {
        let llm = Arc::new(CountingLlm::default());
        let response = pipeline(Vec::new(), llm.clone())
            .query(&QueryRequest::new("anything"))
            .await
            .unwrap();

        assert_eq!(response.answer, NO_CONTEXT_ANSWER);
        assert!(response.evaluation.is_none());
        assert!(response.retrieved_documents.is_empty());
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_query_with_evaluation() {
        let llm = Arc::new(CountingLlm::default());
        let hits = vec![scored("relevant text", 0.9), scored("other text", 0.5)];
        let response = pipeline(hits, llm.clone())
            .query(&QueryRequest::new("a question"))
            .await
            .unwrap();

        assert_eq!(response.answer, "A generated answer.");
        assert_eq!(response.retrieved_documents.len(), 2);
        // answer call plus faithfulness call
        assert_eq!(llm.calls.load(Ordering::SeqCst), 2);

        let eval = response.evaluation.unwrap();
        assert!((eval.faithfulness - 0.8).abs() < 1e-6);
        assert!(eval.rag_score >= 0.0 && eval.rag_score <= 100.0);
    }

    #[tokio::test]
    async fn test_evaluation_skipped_on_request() {
        let llm = Arc::new(CountingLlm::default());
        let hits = vec![scored("text", 0.9)];
        let response = pipeline(hits, llm.clone())
            .query(&QueryRequest::new("q").without_evaluation())
            .await
            .unwrap();

        assert!(response.evaluation.is_none());
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_top_k_caps_retrieval() {
        let llm = Arc::new(CountingLlm::default());
        let hits = vec![scored("a", 0.9), scored("b", 0.8), scored("c", 0.7)];
        let response = pipeline(hits, llm)
            .query(&QueryRequest::new("q").with_top_k(2).without_evaluation())
            .await
            .unwrap();
        assert_eq!(response.retrieved_documents.len(), 2);
    }

    #[tokio::test]
    async fn test_top_k_beyond_stored_returns_all_stored() {
        let llm = Arc::new(CountingLlm::default());
        let hits = vec![scored("a", 0.9), scored("b", 0.8), scored("c", 0.7)];
        let response = pipeline(hits, llm)
            .query(&QueryRequest::new("q").with_top_k(10).without_evaluation())
            .await
            .unwrap();
        assert_eq!(response.retrieved_documents.len(), 3);
    }
}
