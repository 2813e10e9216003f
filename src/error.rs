//! Typed failures of the local search and SQL paths.
//!
//! Parsing, tokenizing and scoring never fail, so the only search error is a
//! corpus that cannot be read. Callers can tell "no results" apart from
//! "could not read the corpus".

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("knowledge corpus not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    #[error("knowledge corpus unreadable: {}: {source}", .path.display())]
    CorpusUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SqlError {
    #[error("SQL allowlist unreadable: {}: {source}", .path.display())]
    AllowlistUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL allowlist is not a table-to-columns JSON object: {0}")]
    AllowlistInvalid(#[from] serde_json::Error),

    #[error("Table '{0}' is not in the allowlist.")]
    TableNotAllowed(String),

    #[error("Column '{column}' is not in the allowlist for '{table}'.")]
    ColumnNotAllowed { table: String, column: String },

    #[error("None of the group_by columns are in the allowlist.")]
    NoGroupByColumns,

    #[error("Only SELECT queries are allowed.")]
    NotSelect,

    #[error("Forbidden keyword '{0}' detected in query.")]
    ForbiddenKeyword(&'static str),
}

impl SqlError {
    /// True for policy rejections (caller input), false for server-side
    /// allowlist problems.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            SqlError::AllowlistUnreadable { .. } | SqlError::AllowlistInvalid(_)
        )
    }
}
