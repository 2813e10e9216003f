use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::SearchError;
use crate::models::{RemoteSearchResponse, SearchRequest, SearchResponse};
use crate::search::{local, remote};
use crate::state::AppState;

/// POST /api/search - Lexical search over the configured knowledge document.
/// The document is re-read on every request.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let top_k = req.top_k.unwrap_or(state.config.default_top_k);
    let corpus_path = state.config.corpus_path.clone();

    let response = tokio::task::spawn_blocking(move || {
        local::search(&req.query, &corpus_path, top_k, req.filters.as_ref())
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Search task failed: {e}"),
        )
    })?
    .map_err(search_error_response)?;

    Ok(Json(response))
}

/// POST /api/search/remote - Forward the search to the remote knowledge API.
pub async fn search_remote(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<RemoteSearchResponse>, (StatusCode, String)> {
    let top_k = req.top_k.unwrap_or(state.config.default_top_k);

    remote::search_remote(
        &state.http_client,
        &state.config.remote,
        &req.query,
        top_k,
        req.filters.as_ref(),
    )
    .await
    .map(Json)
    .map_err(|e| {
        tracing::warn!("Remote search failed: {e:#}");
        (StatusCode::BAD_GATEWAY, format!("{e:#}"))
    })
}

fn search_error_response(err: SearchError) -> (StatusCode, String) {
    let status = match err {
        SearchError::CorpusNotFound(_) => StatusCode::NOT_FOUND,
        SearchError::CorpusUnreadable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!("{err}");
    (status, err.to_string())
}
