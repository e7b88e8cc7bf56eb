//! Feed retrieval and parsing.
//!
//! Retrieval sits behind the [`FeedClient`] trait so the aggregation pipeline
//! can run against the network ([`HttpFeedClient`]) or an in-memory double in
//! tests. Parsing lives in [`parser`] and understands RSS 2.0, RSS 1.0 (RDF)
//! and Atom documents.
//!
//! # Failure Modes
//!
//! Every way a feed can go wrong is a [`FeedError`] variant:
//!
//! | Variant | Cause |
//! |---------|-------|
//! | [`FeedError::Request`] | Connection failure, TLS error, timeout |
//! | [`FeedError::Status`] | The server answered with a non-2xx status |
//! | [`FeedError::Parse`] | The body is not a well-formed RSS/Atom document |

pub mod parser;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

pub use parser::{FeedEntry, parse_feed};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("feed server returned HTTP {0}")]
    Status(StatusCode),

    #[error("failed to parse feed: {0}")]
    Parse(String),
}

/// Retrieves raw feed documents.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Download the document at `url` and return its body.
    async fn fetch(&self, url: &str) -> Result<Bytes, FeedError>;
}

/// [`FeedClient`] backed by a shared `reqwest` client.
///
/// The underlying client carries a whole-request timeout, so one slow
/// publisher cannot hold an aggregation open indefinitely.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    /// Build a client with the given per-request timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Request`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Bytes, FeedError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Downloaded feed document");
        Ok(body)
    }
}
