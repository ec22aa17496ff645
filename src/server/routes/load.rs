//! Ingestion endpoints: URL scraping and file uploads

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ingestion::detector::is_url;
use crate::server::state::AppState;
use crate::types::query::LoadUrlRequest;
use crate::types::response::{LoadError, LoadResponse};

/// POST /api/load/url - scrape a web page into the knowledge base
pub async fn load_url(
    State(state): State<AppState>,
    Json(request): Json<LoadUrlRequest>,
) -> Result<Json<LoadResponse>> {
    if !is_url(&request.url) {
        return Err(Error::UnsupportedInputType(format!(
            "not an http(s) url: {}",
            request.url
        )));
    }

    info!("Loading URL: {}", request.url);
    let chunks_stored = state.ingest().ingest(&request.url).await?;

    Ok(Json(LoadResponse {
        message: format!("Loaded {} chunks from {}", chunks_stored, request.url),
        chunks_stored,
        errors: Vec::new(),
    }))
}

/// POST /api/load/upload - ingest uploaded files (multipart).
///
/// Files are processed independently; one bad file does not abort the
/// batch. Per-file failures come back in the `errors` list.
pub async fn load_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LoadResponse>> {
    let mut chunks_stored = 0;
    let mut errors = Vec::new();
    let mut files_seen = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Internal(format!("multipart error: {e}")))?
    {
        let Some(filename) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Internal(format!("multipart read error: {e}")))?;
        files_seen += 1;

        match ingest_upload(&state, &filename, &data).await {
            Ok(stored) => chunks_stored += stored,
            Err(e) => {
                warn!("upload {filename} failed: {e}");
                errors.push(LoadError {
                    source: filename,
                    error: e.to_string(),
                });
            }
        }
    }

    if files_seen == 0 {
        return Err(Error::InvalidRequest("no files in upload".to_string()));
    }

    Ok(Json(LoadResponse {
        message: format!(
            "Processed {} file(s): {} chunks stored, {} failed",
            files_seen,
            chunks_stored,
            errors.len()
        ),
        chunks_stored,
        errors,
    }))
}

/// Spool one uploaded file to disk and run it through ingestion.
///
/// The temp file keeps the original extension so extension-based
/// detection still works for formats without magic bytes.
async fn ingest_upload(state: &AppState, filename: &str, data: &[u8]) -> Result<usize> {
    let suffix = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile()?;
    tokio::fs::write(file.path(), data).await?;

    let path = file
        .path()
        .to_str()
        .ok_or_else(|| Error::Internal("non-utf8 temp path".to_string()))?;

    state.ingest().ingest_with_name(path, Some(filename)).await
}
