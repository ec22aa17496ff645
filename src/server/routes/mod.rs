//! API routes for the RAG server

pub mod collection;
pub mod load;
pub mod query;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion
        .route("/load/url", post(load::load_url))
        .route(
            "/load/upload",
            post(load::load_upload).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Query
        .route("/query", post(query::query_rag))
        // Collection management
        .route("/collection", delete(collection::drop_collection))
        // Info
        .route("/info", get(collection::info))
}
