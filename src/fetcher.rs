//! Per-source feed fetching.
//!
//! [`fetch_source`] is the isolation boundary of the pipeline: whatever goes
//! wrong while downloading or parsing one source is logged here and turned
//! into an empty result, so a broken publisher never affects the others.

use crate::feeds::{FeedClient, FeedEntry, FeedError, parse_feed};
use crate::models::{MISSING_FIELD, MISSING_LINK, NewsItem, Source};
use crate::utils::truncate_for_log;
use tracing::{debug, instrument, warn};

/// Maximum number of entries taken from the head of each feed.
pub const MAX_ENTRIES_PER_SOURCE: usize = 10;

/// Fetch one source and normalize its first [`MAX_ENTRIES_PER_SOURCE`] entries.
///
/// Failures are logged at `warn` and yield an empty vector; they are never
/// propagated or retried.
#[instrument(level = "info", skip_all, fields(source = %source.name))]
pub async fn fetch_source(client: &dyn FeedClient, source: &Source) -> Vec<NewsItem> {
    match try_fetch(client, source).await {
        Ok(items) => {
            debug!(count = items.len(), "Fetched feed entries");
            items
        }
        Err(e) => {
            warn!(url = %source.feed_url, error = %e, "Feed fetch failed; skipping source");
            Vec::new()
        }
    }
}

async fn try_fetch(client: &dyn FeedClient, source: &Source) -> Result<Vec<NewsItem>, FeedError> {
    let body = client.fetch(source.feed_url).await?;
    let entries = parse_feed(&body).inspect_err(|_| {
        debug!(
            preview = %truncate_for_log(&String::from_utf8_lossy(&body), 300),
            "Unparseable feed body"
        );
    })?;

    Ok(entries
        .into_iter()
        .take(MAX_ENTRIES_PER_SOURCE)
        .map(|entry| to_news_item(source, entry))
        .collect())
}

/// Map a raw feed entry to a [`NewsItem`], filling in placeholders for
/// missing fields.
pub fn to_news_item(source: &Source, entry: FeedEntry) -> NewsItem {
    NewsItem {
        source: source.name.to_string(),
        title: entry.title.unwrap_or_else(|| MISSING_FIELD.to_string()),
        link: entry.link.unwrap_or_else(|| MISSING_LINK.to_string()),
        published: entry.published.unwrap_or_else(|| MISSING_FIELD.to_string()),
        summary: entry.summary.unwrap_or_else(|| MISSING_FIELD.to_string()),
    }
}
