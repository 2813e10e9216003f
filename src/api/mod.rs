//! Axum handlers exposing the tools as JSON endpoints.

pub mod format;
pub mod rerank;
pub mod search;
pub mod sql;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// All API routes, with state attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(search::search))
        .route("/api/search/remote", post(search::search_remote))
        .route("/api/rerank", post(rerank::rerank))
        .route("/api/format", get(format::describe_format))
        .route("/api/sql/select", post(sql::build_select_query))
        .route("/api/sql/count", post(sql::build_count_query))
        .route("/api/sql/validate", post(sql::validate))
        .with_state(state)
}
