use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Markdown knowledge document served by the local search path
    pub corpus_path: PathBuf,
    /// JSON file mapping table names to their allowed columns
    pub allowlist_path: PathBuf,
    /// `top_k` used when a request does not supply one
    pub default_top_k: usize,
    /// `LIMIT` used by the SELECT builder when a request does not supply one
    pub default_sql_limit: usize,
    /// Remote knowledge API configuration
    pub remote: RemoteSearchConfig,
}

/// Configuration for the HTTP-backed knowledge search (e.g. an Open WebUI instance).
#[derive(Debug, Clone)]
pub struct RemoteSearchConfig {
    /// Base URL of the remote API, without trailing path.
    pub base_url: String,
    /// Path of the search endpoint, appended to `base_url`.
    pub endpoint: String,
    /// Bearer token, sent only when set.
    pub api_key: Option<String>,
    /// Request timeout in seconds (capped at 120).
    pub timeout_secs: u64,
}

impl Default for RemoteSearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            endpoint: "/api/knowledge/search".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl RemoteSearchConfig {
    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9000".to_string(),
            corpus_path: PathBuf::from("data/knowledge.md"),
            allowlist_path: PathBuf::from("data/sql_allowlist.json"),
            default_top_k: 5,
            default_sql_limit: 100,
            remote: RemoteSearchConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. `from_env` passes the
    /// process environment; tests pass a fixed map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("KB_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(path) = lookup("KB_SEARCH_CORPUS_PATH") {
            config.corpus_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("KB_SEARCH_ALLOWLIST_PATH") {
            config.allowlist_path = PathBuf::from(path);
        }
        if let Some(val) = lookup("KB_SEARCH_DEFAULT_TOP_K") {
            if let Ok(v) = val.parse() {
                config.default_top_k = v;
            }
        }
        if let Some(val) = lookup("KB_SEARCH_SQL_LIMIT") {
            if let Ok(v) = val.parse() {
                config.default_sql_limit = v;
            }
        }

        // Remote search config
        if let Some(url) = lookup("REMOTE_SEARCH_BASE_URL") {
            config.remote.base_url = url;
        }
        if let Some(endpoint) = lookup("REMOTE_SEARCH_ENDPOINT") {
            config.remote.endpoint = endpoint;
        }
        if let Some(key) = lookup("REMOTE_SEARCH_API_KEY") {
            if !key.is_empty() {
                config.remote.api_key = Some(key);
            }
        }
        if let Some(val) = lookup("REMOTE_SEARCH_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.remote.timeout_secs = v.min(120);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.corpus_path, PathBuf::from("data/knowledge.md"));
        assert_eq!(config.default_top_k, 5);
        assert_eq!(config.default_sql_limit, 100);
        assert!(config.remote.api_key.is_none());
        assert_eq!(
            config.remote.search_url(),
            "http://localhost:3000/api/knowledge/search"
        );
    }

    #[test]
    fn test_env_overrides_applied() {
        let config = config_from(&[
            ("KB_SEARCH_CORPUS_PATH", "/srv/kb/incidents.md"),
            ("KB_SEARCH_DEFAULT_TOP_K", "12"),
            ("REMOTE_SEARCH_BASE_URL", "http://webui:8080/"),
            ("REMOTE_SEARCH_API_KEY", "secret"),
        ]);
        assert_eq!(config.corpus_path, PathBuf::from("/srv/kb/incidents.md"));
        assert_eq!(config.default_top_k, 12);
        assert_eq!(config.remote.api_key.as_deref(), Some("secret"));
        assert_eq!(
            config.remote.search_url(),
            "http://webui:8080/api/knowledge/search"
        );
    }

    #[test]
    fn test_unparseable_numbers_ignored() {
        let config = config_from(&[
            ("KB_SEARCH_DEFAULT_TOP_K", "many"),
            ("REMOTE_SEARCH_TIMEOUT_SECS", "-1"),
        ]);
        assert_eq!(config.default_top_k, 5);
        assert_eq!(config.remote.timeout_secs, 30);
    }

    #[test]
    fn test_remote_timeout_capped() {
        let config = config_from(&[("REMOTE_SEARCH_TIMEOUT_SECS", "900")]);
        assert_eq!(config.remote.timeout_secs, 120);
    }

    #[test]
    fn test_empty_api_key_treated_as_unset() {
        let config = config_from(&[("REMOTE_SEARCH_API_KEY", "")]);
        assert!(config.remote.api_key.is_none());
    }
}
