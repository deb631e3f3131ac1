use std::sync::Arc;

use anyhow::Context;

use chirpy_api::app::{self, AppState};
use chirpy_api::config::Config;
use chirpy_api::middleware::HitCounter;
use chirpy_store::{ChirpStore, InMemoryStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chirpy_observability::init();

    let config = Config::from_env();

    let store: Arc<dyn ChirpStore> = match &config.database_url {
        Some(url) => Arc::new(
            PostgresStore::connect(url)
                .await
                .context("failed to connect to database")?,
        ),
        None => {
            tracing::warn!("DB_URL not set; using non-persistent in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    let app = app::build_app(
        AppState {
            store,
            hits: HitCounter::new(),
            platform: config.platform,
        },
        &config.asset_root,
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
