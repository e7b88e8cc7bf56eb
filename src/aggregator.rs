//! Language-filtered aggregation over the source registry.
//!
//! # Fan-out
//!
//! Sources are fetched through a bounded `futures::stream` pipeline. The
//! stream is `buffered`, not `buffer_unordered`, so results come back in
//! registry order no matter which publisher answers first. A concurrency of
//! one fetches strictly sequentially.

use crate::feeds::FeedClient;
use crate::fetcher::fetch_source;
use crate::models::{LanguageFilter, NewsItem, Source};
use crate::sorter::sort_by_published;
use crate::sources::select;
use futures::stream::{self, StreamExt};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Fetches and combines the feeds selected by a [`LanguageFilter`].
pub struct Aggregator {
    client: Arc<dyn FeedClient>,
    sources: &'static [Source],
    concurrency: NonZeroUsize,
}

impl Aggregator {
    /// # Arguments
    ///
    /// * `client` - Retrieval backend shared by every fetch
    /// * `sources` - Ordered source registry, normally [`crate::sources::SOURCES`]
    /// * `concurrency` - Maximum number of feeds fetched at once
    pub fn new(
        client: Arc<dyn FeedClient>,
        sources: &'static [Source],
        concurrency: NonZeroUsize,
    ) -> Self {
        Self {
            client,
            sources,
            concurrency,
        }
    }

    /// Fetch every source matching `filter` and concatenate their items in
    /// registry order.
    ///
    /// Sources that fail contribute nothing; see [`fetch_source`].
    #[instrument(level = "info", skip(self), fields(%filter))]
    pub async fn aggregate(&self, filter: LanguageFilter) -> Vec<NewsItem> {
        let t0 = Instant::now();
        let selected = select(self.sources, filter);
        let source_count = selected.len();
        let client = Arc::clone(&self.client);

        let per_source: Vec<Vec<NewsItem>> = stream::iter(selected.into_iter().copied())
            .map(move |source| {
                let client = Arc::clone(&client);
                async move {
                    let items = fetch_source(client.as_ref(), &source).await;
                    debug!(source = %source.name, count = items.len(), "Source contributed items");
                    items
                }
            })
            .buffered(self.concurrency.get())
            .collect()
            .await;

        let empty_sources = per_source.iter().filter(|items| items.is_empty()).count();
        let items: Vec<NewsItem> = per_source.into_iter().flatten().collect();
        info!(
            sources = source_count,
            empty_sources,
            count = items.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Aggregated news"
        );
        items
    }

    /// Aggregate, then order newest first when every date parses.
    ///
    /// When any date is unparseable the items are returned in fetch order.
    pub async fn collect_sorted(&self, filter: LanguageFilter) -> Vec<NewsItem> {
        match sort_by_published(self.aggregate(filter).await) {
            Ok(sorted) => sorted,
            Err(unsorted) => {
                debug!(%filter, "Unparseable publication date; keeping fetch order");
                unsorted
            }
        }
    }
}
