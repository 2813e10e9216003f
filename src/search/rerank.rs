use serde_json::Value;

use crate::models::{RerankResponse, ScoredCandidate};
use crate::search::lexical::{score, tokenize};

/// Re-rank arbitrary candidates by term overlap with `query`.
///
/// Candidates are passed through untouched. Sorting is stable, so equal scores
/// keep their input order; zero-score candidates are kept.
pub fn rerank(query: &str, candidates: Vec<Value>, top_k: usize) -> RerankResponse {
    let query_tokens = tokenize(query);

    let mut results: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let text = candidate_text(&candidate);
            ScoredCandidate {
                score: score(&query_tokens, &tokenize(&text)),
                candidate,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(top_k);

    RerankResponse {
        query: query.to_string(),
        results,
    }
}

/// Text a candidate is scored on: `text`, else `summary`, else the whole
/// candidate rendered as a string.
pub fn candidate_text(candidate: &Value) -> String {
    ["text", "summary"]
        .iter()
        .filter_map(|key| candidate.get(key))
        .find(|value| is_truthy(value))
        .map(render)
        .unwrap_or_else(|| render(candidate))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
