pub mod http_fetcher;
#[cfg(test)]
pub mod mock;

use std::path::Path;

use async_trait::async_trait;

use crate::app::{GrabpodError, Result};
use crate::domain::{FeedDocument, PodcastSpec};

#[async_trait]
pub trait Fetcher {
    /// Download `url` into `dest`, replacing any existing file in full.
    ///
    /// Returns the number of bytes written.
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Fetch a podcast's feed document and store it at `dest`.
///
/// The parent directory of `dest` must already exist. Failures name the
/// podcast alias so the caller can report and move on.
pub async fn fetch_feed(
    fetcher: &(dyn Fetcher + Send + Sync),
    podcast: &PodcastSpec,
    dest: &Path,
) -> Result<FeedDocument> {
    match fetcher.fetch_to_file(&podcast.feed_url, dest).await {
        Ok(size) => Ok(FeedDocument {
            storage_path: dest.to_path_buf(),
            size,
        }),
        Err(e) => Err(GrabpodError::FeedFetch {
            alias: podcast.alias.clone(),
            source: Box::new(e),
        }),
    }
}
