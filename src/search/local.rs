//! File-backed knowledge search.
//!
//! Every call re-reads and re-parses the document, so results always reflect
//! what is on disk. Nothing is cached between calls.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SearchError;
use crate::knowledge::parse_records;
use crate::models::{KnowledgeRecord, RecordSummary, SearchResponse};
use crate::search::filter::matches_filters;
use crate::search::lexical::{score, tokenize};

/// Characters of body text kept in a result summary.
pub const SUMMARY_CHARS: usize = 400;

/// Read the corpus at `corpus_path` and search it.
pub fn search(
    query: &str,
    corpus_path: &Path,
    top_k: usize,
    filters: Option<&BTreeMap<String, String>>,
) -> Result<SearchResponse, SearchError> {
    let text = load_corpus(corpus_path)?;
    Ok(search_text(query, &text, top_k, filters))
}

/// Read the whole corpus. A missing file is reported separately from other
/// I/O failures.
pub fn load_corpus(path: &Path) -> Result<String, SearchError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SearchError::CorpusNotFound(path.to_path_buf())
        } else {
            SearchError::CorpusUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Search an in-memory document.
///
/// Records failing the filters or scoring 0 are dropped; the rest are sorted
/// by descending score (stable, so ties keep document order) and cut to
/// `top_k`. `total` is the number of results returned, not the number matched.
pub fn search_text(
    query: &str,
    text: &str,
    top_k: usize,
    filters: Option<&BTreeMap<String, String>>,
) -> SearchResponse {
    let records = parse_records(text);
    let query_tokens = tokenize(query);
    tracing::debug!(
        "Parsed {} records, {} query tokens",
        records.len(),
        query_tokens.len()
    );

    let mut scored: Vec<(f64, KnowledgeRecord)> = records
        .into_iter()
        .filter(|record| matches_filters(record, filters))
        .filter_map(|record| {
            let s = score(&query_tokens, &tokenize(&index_text(&record)));
            (s > 0.0).then_some((s, record))
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);

    let results: Vec<RecordSummary> = scored
        .into_iter()
        .map(|(_, record)| summarize(record))
        .collect();

    tracing::info!("Local search for '{query}' returned {} results", results.len());

    SearchResponse {
        query: query.to_string(),
        total: results.len(),
        results,
    }
}

/// Composite text a record is scored on: id, type, `key value` pairs, body.
fn index_text(record: &KnowledgeRecord) -> String {
    let mut parts: Vec<&str> = vec![record.record_id.as_str(), record.record_type.as_str()];
    for (key, value) in &record.fields {
        parts.push(key);
        parts.push(value);
    }
    parts.push(&record.body);
    parts.join(" ")
}

fn summarize(record: KnowledgeRecord) -> RecordSummary {
    RecordSummary {
        summary: record.body.chars().take(SUMMARY_CHARS).collect(),
        id: record.record_id,
        record_type: record.record_type,
        fields: record.fields,
    }
}
