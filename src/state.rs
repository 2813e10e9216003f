use std::sync::Arc;

use crate::config::Config;

/// Shared application state. Read-only: searches re-read the corpus on every
/// call, so nothing here changes after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        if !config.corpus_path.exists() {
            tracing::warn!(
                "Knowledge corpus {} does not exist yet; local search will report it as missing",
                config.corpus_path.display()
            );
        }

        Ok(Self {
            config: Arc::new(config),
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()?,
        })
    }
}
