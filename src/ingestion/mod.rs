//! Document ingestion pipeline: detection, extraction, chunking, storage

pub mod chunker;
pub mod detector;
pub mod loaders;
mod processor;

pub use chunker::TextChunker;
pub use detector::detect_input;
pub use loaders::LoaderRegistry;
pub use processor::IngestPipeline;
