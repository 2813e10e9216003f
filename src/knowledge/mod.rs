//! Knowledge document model: key normalization, record identity and the
//! document layout advertised to callers.

pub mod parser;

pub use parser::parse_records;

use std::collections::BTreeMap;

use crate::models::{FormatDescription, RecordType};

/// Block separator line.
pub const SEPARATOR: &str = "---";

/// Identifier fields in priority order, first non-empty match wins.
const IDENTIFIER_FIELDS: &[(&str, RecordType)] = &[
    ("problem_id", RecordType::Problem),
    ("incident_id", RecordType::Incident),
    ("task_id", RecordType::Task),
    ("change_id", RecordType::Change),
];

const REQUIRED_FIELDS: &[&str] = &["id", "service"];

const RECOMMENDED_FIELDS: &[&str] = &[
    "priority",
    "status",
    "category",
    "class",
    "created_at",
    "resolved_at",
    "closed_at",
    "sla_violated",
    "sla_deadline",
    "coordinator",
    "assignee",
];

/// Normalize a header or filter key: trim, spaces and `/` become `_`, lowercase.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().replace([' ', '/'], "_").to_lowercase()
}

/// Infer `(record_id, record_type)` from a block's normalized fields.
pub fn infer_identity(fields: &BTreeMap<String, String>) -> (String, RecordType) {
    for (field, record_type) in IDENTIFIER_FIELDS {
        if let Some(value) = non_empty(fields, field) {
            return (value.clone(), *record_type);
        }
    }

    match non_empty(fields, "id") {
        Some(value) => (value.clone(), RecordType::Unknown),
        None => ("unknown".to_string(), RecordType::Unknown),
    }
}

fn non_empty<'a>(fields: &'a BTreeMap<String, String>, key: &str) -> Option<&'a String> {
    fields.get(key).filter(|v| !v.is_empty())
}

/// Static description of the expected knowledge document.
pub fn describe_format() -> FormatDescription {
    let identifier_fields = IDENTIFIER_FIELDS
        .iter()
        .map(|(field, _)| field.to_string())
        .chain(std::iter::once("id".to_string()))
        .collect();

    FormatDescription {
        format: "knowledge-entry".to_string(),
        separator: SEPARATOR.to_string(),
        identifier_fields,
        required_fields: REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect(),
        recommended_fields: RECOMMENDED_FIELDS.iter().map(|f| f.to_string()).collect(),
        notes: "Separate entries with a line containing only `---`. Each entry starts with \
                `key: value` metadata lines, then a blank line, then free-form text. Keys are \
                matched case-insensitively with spaces and `/` read as `_`. A `---` line \
                inside the text always starts a new entry."
            .to_string(),
    }
}
