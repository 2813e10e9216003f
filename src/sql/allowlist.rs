use std::collections::HashMap;
use std::path::Path;

use crate::error::SqlError;

/// Per-table whitelist of column names that generated SQL may reference.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    tables: HashMap<String, Vec<String>>,
}

impl Allowlist {
    /// Load a `{"table": ["column", ...]}` JSON file. Read fresh on every call
    /// so edits take effect without a restart.
    pub fn load(path: &Path) -> Result<Self, SqlError> {
        let data = std::fs::read_to_string(path).map_err(|source| SqlError::AllowlistUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, SqlError> {
        let tables: HashMap<String, Vec<String>> = serde_json::from_str(data)?;
        Ok(Self { tables })
    }

    /// Allowed columns of `table`, or `TableNotAllowed`.
    pub fn columns(&self, table: &str) -> Result<&[String], SqlError> {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| SqlError::TableNotAllowed(table.to_string()))
    }
}
