//! Command-line interface definitions for the news aggregator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables.

use crate::cache::DEFAULT_TTL;
use clap::Parser;
use std::net::SocketAddr;
use std::num::NonZeroUsize;

/// Command-line arguments for the news aggregator server.
///
/// # Examples
///
/// ```sh
/// # Listen on the default address with a ten minute cache
/// crypto_news_feed
///
/// # Shorter cache window, fetch sources one at a time
/// crypto_news_feed --cache-ttl-secs 120 --fetch-concurrency 1
///
/// # Same, via the environment
/// NEWS_BIND=127.0.0.1:9000 NEWS_FETCH_TIMEOUT_SECS=5 crypto_news_feed
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address the HTTP server listens on
    #[arg(short, long, env = "NEWS_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Seconds an aggregated result is served from cache
    #[arg(long, env = "NEWS_CACHE_TTL_SECS", default_value_t = DEFAULT_TTL.as_secs())]
    pub cache_ttl_secs: u64,

    /// Seconds allowed for a single feed request, connect to last byte
    #[arg(long, env = "NEWS_FETCH_TIMEOUT_SECS", default_value_t = 20)]
    pub fetch_timeout_secs: u64,

    /// Maximum number of feeds fetched at the same time
    #[arg(long, env = "NEWS_FETCH_CONCURRENCY", default_value = "4")]
    pub fetch_concurrency: NonZeroUsize,

    /// User-Agent header sent to feed publishers
    #[arg(long, env = "NEWS_USER_AGENT", default_value = concat!("crypto_news_feed/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["crypto_news_feed"]);

        assert_eq!(cli.bind, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.cache_ttl_secs, 600);
        assert_eq!(cli.fetch_timeout_secs, 20);
        assert_eq!(cli.fetch_concurrency.get(), 4);
        assert!(cli.user_agent.starts_with("crypto_news_feed/"));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "crypto_news_feed",
            "-b",
            "127.0.0.1:9000",
            "--cache-ttl-secs",
            "60",
            "--fetch-timeout-secs",
            "5",
            "--fetch-concurrency",
            "1",
            "--user-agent",
            "tester/1.0",
        ]);

        assert_eq!(cli.bind.port(), 9000);
        assert_eq!(cli.cache_ttl_secs, 60);
        assert_eq!(cli.fetch_timeout_secs, 5);
        assert_eq!(cli.fetch_concurrency.get(), 1);
        assert_eq!(cli.user_agent, "tester/1.0");
    }

    #[test]
    fn test_cli_rejects_zero_concurrency() {
        let result = Cli::try_parse_from(["crypto_news_feed", "--fetch-concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_bad_address() {
        let result = Cli::try_parse_from(["crypto_news_feed", "--bind", "not-an-address"]);
        assert!(result.is_err());
    }
}
