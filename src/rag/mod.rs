//! Retrieval-augmented generation: prompt assembly, answering, evaluation

pub mod eval;
pub mod pipeline;
pub mod prompt;

pub use pipeline::RagPipeline;
pub use prompt::{PromptBuilder, NO_CONTEXT_ANSWER};
