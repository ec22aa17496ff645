//! Query endpoint

use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResponse};

/// POST /api/query - answer a question from the knowledge base
pub async fn query_rag(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    info!("Query: \"{}\" (top_k {})", request.question, request.top_k);

    let response = state.rag().query(&request).await?;

    info!(
        "Answered in {}ms with {} chunks",
        response.processing_time_ms,
        response.retrieved_documents.len()
    );
    Ok(Json(response))
}
