use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::cache::NewsCache;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub cache: Arc<NewsCache>,
}

impl AppState {
    pub fn new(aggregator: Aggregator, cache: NewsCache) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            cache: Arc::new(cache),
        }
    }
}
