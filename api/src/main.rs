use std::sync::Arc;

use api::{db, router, AppConfig, SongSnapshot};
use songsearch::{CatalogProviderBuilder, LyricsProviderBuilder, SearchService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!("Using database {}", config.database_url());

    let pool = db::connect(config.database_url()).await?;

    let catalog = CatalogProviderBuilder::new()
        .base_url(config.catalog_url())
        .timeout(config.provider_timeout())
        .build()?;
    let lyrics = LyricsProviderBuilder::new()
        .base_url(config.lyrics_url())
        .timeout(config.provider_timeout())
        .build()?;

    let service = SearchService::builder()
        .catalog(catalog)
        .lyrics(lyrics)
        .store(Arc::new(SongSnapshot::new(pool)))
        .build()
        .map_err(anyhow::Error::msg)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting server on http://{}", addr);

    axum::serve(listener, router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
