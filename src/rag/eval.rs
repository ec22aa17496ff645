//! Answer quality metrics
//!
//! Context recall compares the query embedding against the retrieved
//! chunk embeddings; faithfulness asks the LLM to grade its own answer
//! against the context. The blend lands in [0, 100].

use tracing::warn;

use crate::error::Result;
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::rag::prompt::PromptBuilder;
use crate::types::AnswerEvaluation;

/// Cosine similarity of two vectors. Zero-magnitude input yields 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Parse a faithfulness grade out of an LLM reply.
///
/// Models sometimes wrap the number in prose, end it with a sentence
/// period, or answer with a range; the first parseable float in the
/// text wins. Anything unparseable grades as 0.0.
pub fn parse_faithfulness(reply: &str) -> f32 {
    let score = reply
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .map(|s| s.trim_end_matches('.'))
        .filter(|s| !s.is_empty())
        .find_map(|s| s.parse::<f32>().ok());

    match score {
        Some(value) => value.clamp(0.0, 1.0),
        None => {
            warn!("unparseable faithfulness reply, defaulting to 0.0: {reply:?}");
            0.0
        }
    }
}

/// Computes both metrics for one answered query
pub struct Evaluator<'a> {
    pub embedder: &'a dyn EmbeddingProvider,
    pub llm: &'a dyn LlmProvider,
}

impl<'a> Evaluator<'a> {
    /// Max cosine similarity between the query and any retrieved chunk.
    ///
    /// Re-embeds both sides with the evaluation embedder rather than
    /// reusing ingest-time vectors.
    pub async fn context_recall(
        &self,
        question: &str,
        chunk_texts: &[String],
    ) -> Result<f32> {
        if chunk_texts.is_empty() {
            return Ok(0.0);
        }

        let query_embedding = self.embedder.embed(question).await?;
        let chunk_embeddings = self.embedder.embed_batch(chunk_texts).await?;

        let best = chunk_embeddings
            .iter()
            .map(|e| cosine_similarity(&query_embedding, e))
            .fold(0.0_f32, f32::max);
        Ok(best)
    }

    /// Grade answer support by the context via a second LLM call
    pub async fn faithfulness(&self, context: &str, answer: &str) -> Result<f32> {
        let messages = PromptBuilder::faithfulness_messages(context, answer);
        let reply = self.llm.complete(&messages, 16).await?;
        Ok(parse_faithfulness(&reply))
    }

    /// Run both metrics and blend them
    pub async fn evaluate(
        &self,
        question: &str,
        chunk_texts: &[String],
        context: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation> {
        let context_recall = self.context_recall(question, chunk_texts).await?;
        let faithfulness = self.faithfulness(context, answer).await?;
        Ok(AnswerEvaluation::from_metrics(context_recall, faithfulness))
    }
}
