use std::collections::BTreeMap;

use crate::knowledge::normalize_key;
use crate::models::KnowledgeRecord;

/// True when every filter (normalized key -> expected substring) matches the
/// record's field case-insensitively. A missing field reads as empty text.
pub fn matches_filters(
    record: &KnowledgeRecord,
    filters: Option<&BTreeMap<String, String>>,
) -> bool {
    let Some(filters) = filters else {
        return true;
    };

    filters.iter().all(|(key, expected)| {
        let actual = record
            .fields
            .get(&normalize_key(key))
            .map(String::as_str)
            .unwrap_or_default();
        actual.to_lowercase().contains(&expected.to_lowercase())
    })
}
