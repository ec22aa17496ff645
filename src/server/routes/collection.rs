//! Collection management and service info endpoints

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::error::Result;
use crate::server::state::AppState;

/// DELETE /api/collection - drop the vector collection and all stored chunks
pub async fn drop_collection(State(state): State<AppState>) -> Result<Json<Value>> {
    let name = state.config().vector_db.collection.clone();
    state.store().drop_collection().await?;
    info!("Collection {name} dropped");

    Ok(Json(json!({
        "message": format!("Collection '{name}' dropped"),
    })))
}

/// GET /api/info - service metadata and current stats
pub async fn info(State(state): State<AppState>) -> Result<Json<Value>> {
    let stored_chunks = state.store().count().await.unwrap_or(0);

    Ok(Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "RAG system with multi-format ingestion and answer evaluation",
        "collection": state.config().vector_db.collection,
        "embedding_model": state.config().embeddings.model,
        "llm_model": state.config().llm.model,
        "stored_chunks": stored_chunks,
        "loaders": state.ingest().registry().available_kinds(),
        "endpoints": {
            "POST /api/load/url": "Scrape and ingest a web page",
            "POST /api/load/upload": "Upload and ingest files (multipart)",
            "POST /api/query": "Answer a question from the knowledge base",
            "DELETE /api/collection": "Drop the vector collection",
            "GET /api/info": "This document"
        }
    })))
}
