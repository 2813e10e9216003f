use axum::extract::State;
use axum::Json;

use crate::models::{RerankRequest, RerankResponse};
use crate::state::AppState;

/// POST /api/rerank - Re-rank caller-supplied candidates by term overlap
pub async fn rerank(
    State(state): State<AppState>,
    Json(req): Json<RerankRequest>,
) -> Json<RerankResponse> {
    let top_k = req.top_k.unwrap_or(state.config.default_top_k);
    Json(crate::search::rerank::rerank(&req.query, req.candidates, top_k))
}
