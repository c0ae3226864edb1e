mod app;
mod cli;
mod error;
mod service;
mod state;

use crate::app::router;
use crate::cli::CLI;
use crate::service::{RedirectConfig, RedirectService};
use crate::state::AppState;
use anyhow::Context;
use clap::Parser;
use questube_cache::MemoryFormatCache;
use questube_resolver::YtDlpResolver;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!(
        listen_addr = %config.listen_addr,
        ytdlp_path = %config.ytdlp_path,
        url_root = %config.url_root,
        no_cache = config.no_cache,
        "starting questube gateway"
    );

    let resolver = YtDlpResolver::with_timeout(
        &config.ytdlp_path,
        Duration::from_secs(config.resolve_timeout),
    );
    let service = RedirectService::new(
        Arc::new(resolver),
        Arc::new(MemoryFormatCache::with_capacity(config.cache_capacity)),
        RedirectConfig::builder()
            .cache_enabled(!config.no_cache)
            .build(),
    );
    let app = router(AppState::new(service), &config.url_root);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    axum::serve(listener, app)
        .await
        .context("gateway server terminated")?;

    Ok(())
}
