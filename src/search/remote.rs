//! HTTP-backed knowledge search. The remote API does the retrieval; this module
//! only normalizes filter keys and wraps the answer in the common
//! `{query, results, total}` shape.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::RemoteSearchConfig;
use crate::knowledge::normalize_key;
use crate::models::RemoteSearchResponse;

#[derive(Serialize)]
struct RemoteSearchRequest<'a> {
    query: &'a str,
    top_k: usize,
    filters: BTreeMap<String, String>,
}

/// Forward a search to the remote knowledge API.
pub async fn search_remote(
    client: &reqwest::Client,
    config: &RemoteSearchConfig,
    query: &str,
    top_k: usize,
    filters: Option<&BTreeMap<String, String>>,
) -> Result<RemoteSearchResponse> {
    let request = build_request(client, config, query, top_k, filters)
        .context("Failed to build remote knowledge search request")?;

    let resp = client
        .execute(request)
        .await
        .context("Failed to reach remote knowledge search")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Remote knowledge search returned {status}: {body}");
    }

    let body: Value = resp
        .json()
        .await
        .context("Failed to parse remote knowledge search response")?;

    let results = extract_results(body);
    tracing::info!(
        "Remote search for '{query}' returned {} results",
        results.len()
    );

    Ok(RemoteSearchResponse {
        query: query.to_string(),
        total: results.len(),
        results,
    })
}

/// POST `{query, top_k, filters}` to the configured endpoint. The bearer
/// header is only attached when an API key is configured.
fn build_request(
    client: &reqwest::Client,
    config: &RemoteSearchConfig,
    query: &str,
    top_k: usize,
    filters: Option<&BTreeMap<String, String>>,
) -> reqwest::Result<reqwest::Request> {
    let req_body = RemoteSearchRequest {
        query,
        top_k,
        filters: normalize_filters(filters),
    };
    let timeout = std::time::Duration::from_secs(config.timeout_secs.min(120));

    let mut request = client
        .post(config.search_url())
        .timeout(timeout)
        .json(&req_body);
    if let Some(api_key) = config.api_key.as_deref() {
        request = request.bearer_auth(api_key);
    }
    request.build()
}

fn normalize_filters(filters: Option<&BTreeMap<String, String>>) -> BTreeMap<String, String> {
    filters
        .into_iter()
        .flatten()
        .map(|(key, value)| (normalize_key(key), value.clone()))
        .collect()
}

/// Use the `results` member when present, otherwise the whole body. Arrays are
/// taken as-is; any other value becomes a single result.
fn extract_results(body: Value) -> Vec<Value> {
    let results = match body {
        Value::Object(mut map) if map.contains_key("results") => {
            map.remove("results").unwrap_or(Value::Null)
        }
        other => other,
    };

    match results {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
