//! Prompt assembly for answering and evaluation

use crate::providers::ChatMessage;
use crate::types::ScoredRecord;

/// Fixed answer returned when retrieval finds nothing.
/// The LLM is never invoked in that case.
pub const NO_CONTEXT_ANSWER: &str =
    "No relevant information was found in the knowledge base for this question.";

/// Sentinel the model is instructed to emit when the supplied context
/// does not contain the answer
pub const INSUFFICIENT_CONTEXT: &str = "INSUFFICIENT_CONTEXT";

const ANSWER_SYSTEM: &str = "You are a knowledge base assistant. Answer the question using \
only the context provided. Do not use outside knowledge. If the context does not contain \
the information needed to answer, reply with exactly: INSUFFICIENT_CONTEXT";

const FAITHFULNESS_SYSTEM: &str = "You grade whether an answer is supported by a context. \
Respond with a single number between 0.0 and 1.0, where 1.0 means every claim in the \
answer is directly supported by the context and 0.0 means none are. Output only the number.";

/// Builds the chat messages sent to the LLM
#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunk texts in rank order, separated by blank lines
    pub fn build_context(records: &[ScoredRecord]) -> String {
        records
            .iter()
            .map(|r| r.record.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Messages for the answer generation call
    pub fn answer_messages(context: &str, question: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(ANSWER_SYSTEM),
            ChatMessage::user(format!(
                "Context:\n{context}\n\nQuestion: {question}\nAnswer:"
            )),
        ]
    }

    /// Messages for the faithfulness grading call
    pub fn faithfulness_messages(context: &str, answer: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(FAITHFULNESS_SYSTEM),
            ChatMessage::user(format!("Context:\n{context}\n\nAnswer:\n{answer}\n\nScore:")),
        ]
    }
}
