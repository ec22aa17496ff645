//! HTTP server for the RAG system

pub mod routes;
pub mod state;

use axum::response::Html;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::RagConfig;
use crate::error::Result;
use state::AppState;

static DASHBOARD_HTML: &str = include_str!("dashboard.html");

/// RAG HTTP Server
pub struct RagServer {
    config: RagConfig,
    state: AppState,
}

impl RagServer {
    /// Create a new RAG server
    pub fn new(config: RagConfig) -> Self {
        let state = AppState::new(config.clone());
        Self { config, state }
    }

    /// Shared state handle
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        // CORS layer - must be added first (outermost)
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let mut router = Router::new()
            // Dashboard
            .route("/", get(dashboard))
            // Health checks
            .route("/health", get(health_check))
            .route("/ready", get(readiness))
            // API routes with body limit for multipart uploads
            .nest("/api", routes::api_routes(self.config.server.max_upload_size))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.server.enable_cors {
            router = router.layer(cors);
        }
        router
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| crate::error::Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting RAG server on http://{}", addr);
        tracing::info!("Dashboard: http://{}/", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| crate::error::Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// GET / - dashboard page
async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check endpoint: verifies the embedding and vector store
/// backends are reachable
async fn readiness(state: axum::extract::State<AppState>) -> axum::http::StatusCode {
    match state.check_backends().await {
        Ok(()) => axum::http::StatusCode::OK,
        Err(e) => {
            tracing::warn!("readiness probe failed: {e}");
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let server = RagServer::new(RagConfig::default());
        assert_eq!(server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds() {
        let server = RagServer::new(RagConfig::default());
        let _router = server.build_router();
    }
}
