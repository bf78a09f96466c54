use std::sync::Arc;

use crate::app::error::Result;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::processor::FeedProcessor;

pub struct AppContext {
    pub processor: FeedProcessor,
}

impl AppContext {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new()?)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            processor: FeedProcessor::new(fetcher, Normalizer::new()),
        }
    }
}
