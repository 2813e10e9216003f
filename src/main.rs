use tracing_subscriber::EnvFilter;

use kb_search::api;
use kb_search::config::Config;
use kb_search::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Knowledge corpus: {}", config.corpus_path.display());
    tracing::info!("SQL allowlist: {}", config.allowlist_path.display());
    tracing::info!("Remote search: {}", config.remote.search_url());

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
