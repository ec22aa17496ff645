//! RAG Server binary
//!
//! Run with: cargo run --bin knowledge-rag-server

use knowledge_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "knowledge_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                    Knowledge RAG System                   ║
║        Multi-format Ingestion + Evaluated Answers         ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration (defaults with environment overrides)
    let config = RagConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Vector collection: {}", config.vector_db.collection);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);

    // Check Ollama
    tracing::info!("Checking Ollama at {}...", config.embeddings.base_url);
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/api/tags", config.embeddings.base_url))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Ollama is running");
        }
        _ => {
            tracing::warn!("Ollama not available at {}", config.embeddings.base_url);
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Start: ollama serve");
            tracing::warn!("  2. Pull the embedding model: ollama pull {}", config.embeddings.model);
        }
    }

    // Check Qdrant
    tracing::info!("Checking Qdrant at {}...", config.vector_db.url());
    match client
        .get(format!("{}/collections", config.vector_db.url()))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Qdrant is running");
        }
        _ => {
            tracing::warn!("Qdrant not available at {}", config.vector_db.url());
            tracing::warn!("Start it with: docker run -p 6333:6333 qdrant/qdrant");
        }
    }

    // Create and start server
    let server = RagServer::new(config);

    println!("\nServer starting...");
    println!("  Dashboard: http://{}/", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST   /api/load/url     - Scrape and ingest a web page");
    println!("  POST   /api/load/upload  - Upload documents");
    println!("  POST   /api/query        - Ask questions");
    println!("  DELETE /api/collection   - Drop the vector collection");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
