//! # Crypto News Feed
//!
//! A small HTTP service that aggregates crypto news from a fixed set of
//! English and Turkish RSS/Atom feeds and serves it as JSON.
//!
//! ## Usage
//!
//! ```sh
//! crypto_news_feed --bind 0.0.0.0:8000
//! curl localhost:8000/news/tr
//! ```
//!
//! ## Architecture
//!
//! Each request for `/news/{lang}` runs through a short pipeline:
//! 1. **Cache**: A fresh result for the language is returned immediately
//! 2. **Aggregation**: Matching sources are fetched (bounded parallel, registry order)
//! 3. **Fetching**: Each feed is downloaded, parsed and capped at 10 entries; failures yield nothing
//! 4. **Sorting**: Items are ordered newest first unless some date is unparseable
//! 5. **Cache write**: The result is stored for the TTL window

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod api;
mod cache;
mod cli;
mod feeds;
mod fetcher;
mod models;
mod sorter;
mod sources;
mod utils;

use aggregator::Aggregator;
use api::AppState;
use cache::NewsCache;
use cli::Cli;
use feeds::HttpFeedClient;
use sources::SOURCES;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    info!(?args, "crypto_news_feed starting up");

    let client = HttpFeedClient::new(
        Duration::from_secs(args.fetch_timeout_secs),
        &args.user_agent,
    )
    .inspect_err(|e| error!(error = %e, "Failed to build HTTP client"))?;

    let aggregator = Aggregator::new(Arc::new(client), SOURCES, args.fetch_concurrency);
    let cache = NewsCache::new(Duration::from_secs(args.cache_ttl_secs));
    info!(
        sources = SOURCES.len(),
        ttl_secs = cache.ttl().as_secs(),
        concurrency = args.fetch_concurrency.get(),
        "Pipeline configured"
    );

    let app = api::create_app(AppState::new(aggregator, cache));

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .inspect_err(|e| error!(addr = %args.bind, error = %e, "Failed to bind"))?;
    info!(addr = %args.bind, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
