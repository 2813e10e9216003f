//! Term-overlap scoring shared by local search and the reranker.
//!
//! No length normalization, IDF weighting or stemming: the score of a document
//! is the sum, over query tokens, of how often the token occurs in it.

use std::collections::HashMap;

/// Lowercase maximal runs of word characters (alphanumerics, `_`) and hyphens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_token_char(c))
        .filter(|run| !run.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Occurrence count per token.
pub fn term_counts(tokens: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::with_capacity(tokens.len());
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Score `doc_tokens` against `query_tokens`. Repeated query tokens count once
/// per occurrence. Empty inputs score exactly 0.
pub fn score(query_tokens: &[String], doc_tokens: &[String]) -> f64 {
    if query_tokens.is_empty() || doc_tokens.is_empty() {
        return 0.0;
    }
    let counts = term_counts(doc_tokens);
    let total: usize = query_tokens
        .iter()
        .map(|token| counts.get(token.as_str()).copied().unwrap_or(0))
        .sum();
    total as f64
}
