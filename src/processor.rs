use std::path::Path;
use std::sync::Arc;

use crate::app::{GrabpodError, Result};
use crate::config::RunPlan;
use crate::domain::{FeedDocument, PodcastReport, PodcastSpec, PodcastStatus, RunSummary};
use crate::enclosure::fetch_enclosure;
use crate::fetcher::{fetch_feed, Fetcher};
use crate::normalizer::Normalizer;

/// Runs podcasts one after another, and items within a podcast one after
/// another. Nothing overlaps, so two items can never race for a path.
pub struct FeedProcessor {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl FeedProcessor {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, normalizer: Normalizer) -> Self {
        Self {
            fetcher,
            normalizer,
        }
    }

    /// Process every podcast in the plan. Only directory creation failures
    /// abort the run; feed and item failures are recorded and skipped.
    pub async fn run(&self, plan: &RunPlan) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for podcast in &plan.podcasts {
            let report = self
                .process(
                    podcast,
                    &plan.alias_dir(podcast),
                    plan.limit_for(podcast),
                    plan.dry_run,
                )
                .await?;
            summary.record(&report);
        }

        Ok(summary)
    }

    pub async fn process(
        &self,
        podcast: &PodcastSpec,
        alias_dir: &Path,
        limit: Option<usize>,
        dry_run: bool,
    ) -> Result<PodcastReport> {
        if !alias_dir.is_dir() {
            println!("Creating {}", alias_dir.display());
            std::fs::create_dir_all(alias_dir).map_err(|e| GrabpodError::CreateDir {
                path: alias_dir.to_path_buf(),
                source: e,
            })?;
        }

        let feed_path = FeedDocument::storage_path_for(alias_dir);
        println!(
            "Attempting to fetch {}'s podcast list to {}",
            podcast.alias,
            feed_path.display()
        );

        let document = match fetch_feed(self.fetcher.as_ref(), podcast, &feed_path).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", podcast.alias, e);
                eprintln!("  {}", e);
                return Ok(PodcastReport::new(
                    &podcast.alias,
                    PodcastStatus::FeedUnavailable(e),
                ));
            }
        };
        tracing::debug!(
            "Stored {} bytes of feed for {}",
            document.size,
            podcast.alias
        );

        println!("Looking for links in {}", document.storage_path.display());
        match limit {
            Some(n) => println!("  Getting top {} items", n),
            None => println!("  Getting all items"),
        }

        let items = match self.normalizer.select_items(&document.storage_path, limit) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", podcast.alias, e);
                eprintln!("  {}", e);
                return Ok(PodcastReport::new(
                    &podcast.alias,
                    PodcastStatus::FeedUnparseable(e),
                ));
            }
        };

        let mut report = PodcastReport::new(&podcast.alias, PodcastStatus::Processed);
        for item in &items {
            let outcome = fetch_enclosure(self.fetcher.as_ref(), item, alias_dir, dry_run).await;
            report.outcomes.push(outcome);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{FetchOutcome, SkipReason};
    use crate::fetcher::mock::MockFetcher;
    use tempfile::TempDir;

    const FEED_URL: &str = "http://example/feed.xml";

    fn episode_url(name: &str) -> String {
        format!("http://example/media/{}.mp3", name)
    }

    fn feed_with(names: &[&str]) -> String {
        let items: String = names
            .iter()
            .map(|name| {
                format!(
                    r#"<item><title>Episode {}</title><guid>{}</guid><enclosure url="{}" length="3" type="audio/mpeg"/></item>"#,
                    name,
                    name,
                    episode_url(name)
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Show</title><link>http://example</link><description>d</description>{}</channel></rss>"#,
            items
        )
    }

    fn day6_fetcher() -> MockFetcher {
        let names = ["a", "b", "c", "d", "e"];
        names.iter().fold(
            MockFetcher::new().with_body(FEED_URL, feed_with(&names)),
            |fetcher, name| fetcher.with_body(&episode_url(name), name.as_bytes().to_vec()),
        )
    }

    fn plan(base_dir: &Path, podcasts: Vec<PodcastSpec>) -> RunPlan {
        RunPlan {
            base_dir: base_dir.to_path_buf(),
            podcasts,
            limit_override: None,
            dry_run: false,
            unknown_names: Vec::new(),
        }
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_configured_limit_fetches_prefix() {
        let base = TempDir::new().unwrap();
        let fetcher = Arc::new(day6_fetcher());
        let processor = FeedProcessor::new(fetcher.clone(), Normalizer::new());
        let plan = plan(
            base.path(),
            vec![PodcastSpec::new("day6", FEED_URL).with_limit(2)],
        );

        let summary = processor.run(&plan).await.unwrap();

        assert_eq!(summary.fetched, 2);
        assert_eq!(
            files_in(&base.path().join("day6")),
            vec!["a.mp3", "b.mp3", "feed.xml"]
        );
        assert_eq!(
            fetcher.requests(),
            vec![FEED_URL.to_string(), episode_url("a"), episode_url("b")]
        );
    }

    #[tokio::test]
    async fn test_override_zero_selects_nothing() {
        let base = TempDir::new().unwrap();
        let fetcher = Arc::new(day6_fetcher());
        let processor = FeedProcessor::new(fetcher.clone(), Normalizer::new());
        let mut plan = plan(
            base.path(),
            vec![PodcastSpec::new("day6", FEED_URL).with_limit(3)],
        );
        plan.limit_override = Some(0);

        let summary = processor.run(&plan).await.unwrap();

        assert_eq!(summary.fetched, 0);
        assert_eq!(fetcher.requests(), vec![FEED_URL.to_string()]);
        assert_eq!(files_in(&base.path().join("day6")), vec!["feed.xml"]);
    }

    #[tokio::test]
    async fn test_rerun_does_not_redownload() {
        let base = TempDir::new().unwrap();
        let alias_dir = base.path().join("day6");
        std::fs::create_dir_all(&alias_dir).unwrap();
        std::fs::write(alias_dir.join("a.mp3"), b"kept as is").unwrap();

        let fetcher = Arc::new(day6_fetcher());
        let processor = FeedProcessor::new(fetcher.clone(), Normalizer::new());
        let spec = PodcastSpec::new("day6", FEED_URL);

        let report = processor.process(&spec, &alias_dir, Some(2), false).await.unwrap();

        assert!(matches!(
            report.outcomes[0],
            FetchOutcome::Skipped(SkipReason::AlreadyExists(_))
        ));
        assert!(matches!(report.outcomes[1], FetchOutcome::Fetched(_)));
        assert_eq!(std::fs::read(alias_dir.join("a.mp3")).unwrap(), b"kept as is");
        assert!(!fetcher.requests().contains(&episode_url("a")));
    }

    #[tokio::test]
    async fn test_dry_run_only_writes_feed() {
        let base = TempDir::new().unwrap();
        let fetcher = Arc::new(day6_fetcher());
        let processor = FeedProcessor::new(fetcher.clone(), Normalizer::new());
        let mut plan = plan(base.path(), vec![PodcastSpec::new("day6", FEED_URL)]);
        plan.dry_run = true;

        let summary = processor.run(&plan).await.unwrap();

        assert_eq!(summary.would_fetch, 5);
        assert_eq!(summary.fetched, 0);
        assert_eq!(files_in(base.path()), vec!["day6"]);
        assert_eq!(files_in(&base.path().join("day6")), vec!["feed.xml"]);
        assert_eq!(fetcher.requests(), vec![FEED_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_empty_feed_downloads_nothing() {
        let base = TempDir::new().unwrap();
        let fetcher = Arc::new(MockFetcher::new().with_body(FEED_URL, feed_with(&[])));
        let processor = FeedProcessor::new(fetcher, Normalizer::new());
        let spec = PodcastSpec::new("quiet", FEED_URL);

        let report = processor
            .process(&spec, &base.path().join("quiet"), None, false)
            .await
            .unwrap();

        assert!(matches!(report.status, PodcastStatus::Processed));
        assert!(report.outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_run() {
        let base = TempDir::new().unwrap();
        let good_feed = "http://example/good.xml";
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_body("http://example/broken.xml", "<<< definitely not a feed")
                .with_body(good_feed, feed_with(&["a"]))
                .with_body(&episode_url("a"), b"a".to_vec()),
        );
        let processor = FeedProcessor::new(fetcher, Normalizer::new());
        let plan = plan(
            base.path(),
            vec![
                PodcastSpec::new("offline", "http://example/offline.xml"),
                PodcastSpec::new("broken", "http://example/broken.xml"),
                PodcastSpec::new("good", good_feed),
            ],
        );

        let summary = processor.run(&plan).await.unwrap();

        assert_eq!(summary.podcasts, 3);
        assert_eq!(summary.feed_errors, 2);
        assert_eq!(summary.fetched, 1);
        assert!(base.path().join("good").join("a.mp3").exists());
    }

    #[tokio::test]
    async fn test_feed_errors_are_classified() {
        let base = TempDir::new().unwrap();
        let fetcher = Arc::new(
            MockFetcher::new().with_body("http://example/broken.xml", "not xml"),
        );
        let processor = FeedProcessor::new(fetcher, Normalizer::new());

        let offline = processor
            .process(
                &PodcastSpec::new("offline", "http://example/offline.xml"),
                &base.path().join("offline"),
                None,
                false,
            )
            .await
            .unwrap();
        assert!(matches!(offline.status, PodcastStatus::FeedUnavailable(_)));

        let broken = processor
            .process(
                &PodcastSpec::new("broken", "http://example/broken.xml"),
                &base.path().join("broken"),
                None,
                false,
            )
            .await
            .unwrap();
        assert!(matches!(broken.status, PodcastStatus::FeedUnparseable(_)));
    }

    #[tokio::test]
    async fn test_uncreatable_directory_is_fatal() {
        let base = TempDir::new().unwrap();
        let blocker = base.path().join("blocker");
        std::fs::write(&blocker, b"a file, not a directory").unwrap();

        let processor = FeedProcessor::new(Arc::new(day6_fetcher()), Normalizer::new());
        let alias_dir: PathBuf = blocker.join("day6");

        let err = processor
            .process(&PodcastSpec::new("day6", FEED_URL), &alias_dir, None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, GrabpodError::CreateDir { .. }));
    }
}
