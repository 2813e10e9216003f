use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::SqlError;
use crate::models::{CountRequest, SelectRequest, SqlQuery, ValidateSqlRequest, ValidateSqlResponse};
use crate::sql::{build_count, build_select, ensure_read_only, Allowlist};
use crate::state::AppState;

/// POST /api/sql/select - Parameterized SELECT restricted to the allowlist
pub async fn build_select_query(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<SqlQuery>, (StatusCode, String)> {
    let allowlist = load_allowlist(&state)?;
    let limit = req.limit.unwrap_or(state.config.default_sql_limit);
    build_select(&allowlist, &req.table, &req.columns, &req.filters, limit)
        .map(Json)
        .map_err(sql_error_response)
}

/// POST /api/sql/count - COUNT(*) with optional date range and GROUP BY
pub async fn build_count_query(
    State(state): State<AppState>,
    Json(req): Json<CountRequest>,
) -> Result<Json<SqlQuery>, (StatusCode, String)> {
    let allowlist = load_allowlist(&state)?;
    build_count(&allowlist, &req)
        .map(Json)
        .map_err(sql_error_response)
}

/// POST /api/sql/validate - Check that a statement is a plain read-only SELECT
pub async fn validate(Json(req): Json<ValidateSqlRequest>) -> Json<ValidateSqlResponse> {
    let result = ensure_read_only(&req.sql);
    if let Err(e) = &result {
        tracing::info!("Rejected SQL: {e}");
    }
    Json(ValidateSqlResponse {
        read_only: result.is_ok(),
        error: result.err().map(|e| e.to_string()),
    })
}

/// The allowlist is re-read per request so edits apply without a restart.
fn load_allowlist(state: &AppState) -> Result<Allowlist, (StatusCode, String)> {
    Allowlist::load(&state.config.allowlist_path).map_err(sql_error_response)
}

fn sql_error_response(err: SqlError) -> (StatusCode, String) {
    if err.is_rejection() {
        tracing::info!("SQL request rejected: {err}");
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        tracing::error!("{err}");
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}
