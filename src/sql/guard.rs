use crate::error::SqlError;

/// Statements that disqualify a query when they appear as a whole word.
const FORBIDDEN_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "DROP", "ALTER", "TRUNCATE", "CREATE",
];

/// Reject anything that is not a plain SELECT before it reaches a database
/// driver. Keywords are matched as whole words, so `created_at` passes while
/// `; CREATE TABLE` does not.
pub fn ensure_read_only(sql: &str) -> Result<(), SqlError> {
    let normalized = sql.trim().to_uppercase();
    if !normalized.starts_with("SELECT") {
        return Err(SqlError::NotSelect);
    }

    let forbidden = normalized
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .find_map(|word| FORBIDDEN_KEYWORDS.iter().copied().find(|keyword| *keyword == word));

    match forbidden {
        Some(keyword) => Err(SqlError::ForbiddenKeyword(keyword)),
        None => Ok(()),
    }
}
