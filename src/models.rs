use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of knowledge entry, inferred from the identifier field it carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Problem,
    Incident,
    Task,
    Change,
    Unknown,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Problem => "problem",
            RecordType::Incident => "incident",
            RecordType::Task => "task",
            RecordType::Change => "change",
            RecordType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed block of the knowledge document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeRecord {
    pub record_id: String,
    pub record_type: RecordType,
    /// Normalized header key -> raw value.
    pub fields: BTreeMap<String, String>,
    pub body: String,
}

/// Search result view of a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub fields: BTreeMap<String, String>,
    /// First 400 characters of the body.
    pub summary: String,
}

/// Search request (local and remote)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Falls back to the configured default when absent.
    pub top_k: Option<usize>,
    pub filters: Option<BTreeMap<String, String>>,
}

/// Local search response. `total` is the number of returned results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<RecordSummary>,
    pub total: usize,
}

/// Remote search response; results are passed through as the remote API sent them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSearchResponse {
    pub query: String,
    pub results: Vec<Value>,
    pub total: usize,
}

/// Rerank request
#[derive(Debug, Clone, Deserialize)]
pub struct RerankRequest {
    pub query: String,
    #[serde(default)]
    pub candidates: Vec<Value>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    pub score: f64,
    pub candidate: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankResponse {
    pub query: String,
    pub results: Vec<ScoredCandidate>,
}

/// Expected layout of the knowledge document, returned by `GET /api/format`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDescription {
    pub format: String,
    pub separator: String,
    /// Identifier fields in the order they are tried.
    pub identifier_fields: Vec<String>,
    pub required_fields: Vec<String>,
    pub recommended_fields: Vec<String>,
    pub notes: String,
}

/// SELECT builder request
#[derive(Debug, Clone, Deserialize)]
pub struct SelectRequest {
    pub table: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub filters: Map<String, Value>,
    pub limit: Option<usize>,
}

/// COUNT(*) builder request
#[derive(Debug, Clone, Deserialize)]
pub struct CountRequest {
    pub table: String,
    #[serde(default)]
    pub filters: Map<String, Value>,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    pub year: Option<i32>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub group_by: Option<Vec<String>>,
}

fn default_date_column() -> String {
    "created_at".to_string()
}

/// Parameterized SQL produced by the builders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Map<String, Value>,
}

/// Read-only check request
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateSqlRequest {
    pub sql: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateSqlResponse {
    pub read_only: bool,
    pub error: Option<String>,
}
