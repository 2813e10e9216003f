use axum::Json;

use crate::models::FormatDescription;

/// GET /api/format - Expected layout of knowledge entries
pub async fn describe_format() -> Json<FormatDescription> {
    Json(crate::knowledge::describe_format())
}
