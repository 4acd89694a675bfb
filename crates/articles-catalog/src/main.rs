mod cache;
mod config;
mod error;
mod model;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::CatalogCache;
use config::Config;
use server::ArticlesCatalogServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting articles-catalog MCP server");

    // 1. Load config from environment
    let config = Config::from_env()?;
    info!(
        snapshot_path = %config.snapshot_path.display(),
        redis = config.redis_url.is_some(),
        "configuration loaded"
    );

    // 2. Connect to Redis (optional, degrades gracefully if unavailable)
    let redis_cache = catalog_common::redis::RedisCache::new(config.redis_url.as_deref());
    if redis_cache.is_available().await {
        info!("redis connected");
    } else {
        info!("redis unavailable, running without cache");
    }
    let cache = Arc::new(CatalogCache::new(redis_cache));

    // 3. Load the article snapshot
    let articles =
        catalog_common::snapshot::load_snapshot::<model::Article>(&config.snapshot_path)
            .map_err(error::AppError::Common)?;
    info!(articles = articles.len(), "snapshot loaded");

    // 4. Build MCP server and serve on stdio
    let server = ArticlesCatalogServer::new(articles, cache, config);

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
