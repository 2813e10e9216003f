//! Integration tests for the knowledge search tools.
//!
//! These tests exercise the on-disk corpus and allowlist flows without a
//! running server or remote knowledge API.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::json;

use kb_search::error::{SearchError, SqlError};
use kb_search::knowledge::{describe_format, parse_records};
use kb_search::models::{CountRequest, RecordType};
use kb_search::search::local::search;
use kb_search::search::rerank::rerank;
use kb_search::sql::{build_count, build_select, ensure_read_only, Allowlist};

/// Helper: a small incident knowledge base.
const INCIDENT_KB: &str = "\
incident_id: INC-100
service: Billing
priority: High
status: Closed

Database timeout during nightly invoice export.
---
incident_id: INC-101
service: Network
priority: Low

Network outage in the east data centre after a switch reboot.
---
problem_id: PRB-7
incident_id: INC-102
service: Billing Team
status: Open

Database timeout again. The database connection pool was exhausted, so the
database refused new sessions until the pool was resized.
";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_end_to_end_database_timeout_top_two() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_file(dir.path(), "knowledge.md", INCIDENT_KB);

    let resp = search("database timeout", &corpus, 2, None).unwrap();
    assert_eq!(resp.total, 2);
    assert_eq!(resp.results.len(), 2);

    // The repetitive problem record outranks the single mention
    assert_eq!(resp.results[0].id, "PRB-7");
    assert_eq!(resp.results[0].record_type, RecordType::Problem);
    assert_eq!(resp.results[1].id, "INC-100");
    assert!(resp.results.iter().all(|r| r.id != "INC-101"));
}

#[test]
fn test_search_with_filters_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_file(dir.path(), "knowledge.md", INCIDENT_KB);

    let mut filters = BTreeMap::new();
    filters.insert("Service".to_string(), "billing".to_string());
    filters.insert("STATUS".to_string(), "open".to_string());

    let resp = search("database", &corpus, 10, Some(&filters)).unwrap();
    assert_eq!(resp.total, 1);
    assert_eq!(resp.results[0].id, "PRB-7");
    assert_eq!(resp.results[0].fields["service"], "Billing Team");
}

#[test]
fn test_search_reflects_latest_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_file(dir.path(), "knowledge.md", INCIDENT_KB);
    assert!(search("certificate", &corpus, 5, None).unwrap().results.is_empty());

    let updated = format!(
        "{INCIDENT_KB}---\nchange_id: CHG-9\nservice: Edge\n\nRotate the expiring TLS certificate.\n"
    );
    std::fs::write(&corpus, updated).unwrap();

    let resp = search("certificate", &corpus, 5, None).unwrap();
    assert_eq!(resp.total, 1);
    assert_eq!(resp.results[0].id, "CHG-9");
    assert_eq!(resp.results[0].record_type, RecordType::Change);
}

#[test]
fn test_top_k_zero_returns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_file(dir.path(), "knowledge.md", INCIDENT_KB);

    let resp = search("database timeout", &corpus, 0, None).unwrap();
    assert!(resp.results.is_empty());
    assert_eq!(resp.total, 0);
}

#[test]
fn test_missing_corpus_is_distinct_from_no_results() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_file(dir.path(), "knowledge.md", INCIDENT_KB);

    let empty = search("kubernetes", &corpus, 5, None).unwrap();
    assert_eq!(empty.total, 0);

    let missing = dir.path().join("nope.md");
    let err = search("kubernetes", &missing, 5, None).unwrap_err();
    assert!(matches!(err, SearchError::CorpusNotFound(_)));
}

#[test]
fn test_parse_matches_format_description() {
    let records = parse_records(INCIDENT_KB);
    assert_eq!(records.len(), 3);

    let format = describe_format();
    for record in &records {
        let identifier = format
            .identifier_fields
            .iter()
            .find(|f| record.fields.contains_key(*f))
            .unwrap();
        assert_eq!(&record.fields[identifier], &record.record_id);
    }
}

#[test]
fn test_rerank_local_search_results() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_file(dir.path(), "knowledge.md", INCIDENT_KB);

    let resp = search("billing", &corpus, 10, None).unwrap();
    let candidates: Vec<_> = resp
        .results
        .iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect();
    assert_eq!(candidates.len(), 2);

    // Summaries drive the rerank, so the pool-exhaustion record wins on "pool"
    let reranked = rerank("connection pool", candidates, 5);
    assert_eq!(reranked.results.len(), 2);
    assert_eq!(reranked.results[0].candidate["id"], "PRB-7");
    assert_eq!(reranked.results[0].score, 3.0);
    assert_eq!(reranked.results[1].score, 0.0);
}

#[test]
fn test_sql_builders_with_allowlist_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "sql_allowlist.json",
        r#"{"incidents": ["id", "service", "priority", "status", "created_at"]}"#,
    );
    let allowlist = Allowlist::load(&path).unwrap();

    let filters = json!({"priority": {"op": "IN", "value": ["High", "Critical"]}, "owner": "me"});
    let select = build_select(
        &allowlist,
        "incidents",
        &["id".to_string(), "service".to_string(), "secret".to_string()],
        filters.as_object().unwrap(),
        50,
    )
    .unwrap();
    assert_eq!(
        select.sql,
        "SELECT id, service FROM incidents WHERE priority IN (:p0_0, :p0_1) LIMIT 50;"
    );
    assert!(ensure_read_only(&select.sql).is_ok());

    let count_req: CountRequest = serde_json::from_value(json!({
        "table": "incidents",
        "filters": {"status": "Closed"},
        "year": 2024,
        "group_by": ["service"]
    }))
    .unwrap();
    let count = build_count(&allowlist, &count_req).unwrap();
    assert_eq!(
        count.sql,
        "SELECT service, COUNT(*) AS cnt FROM incidents WHERE status = :p0 \
         AND EXTRACT(YEAR FROM created_at) = :_year GROUP BY service ORDER BY cnt DESC;"
    );
    assert!(ensure_read_only(&count.sql).is_ok());

    let err = build_select(&allowlist, "payroll", &[], &Default::default(), 10).unwrap_err();
    assert!(matches!(err, SqlError::TableNotAllowed(_)));
}
