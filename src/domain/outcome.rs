use std::fmt;
use std::path::PathBuf;

use crate::app::GrabpodError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The item carries no enclosure URL.
    NoEnclosure,
    /// The enclosure URL path has no usable final segment.
    NoFilename,
    /// The destination file is already on disk.
    AlreadyExists(PathBuf),
}

/// Terminal state of one item.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(PathBuf),
    WouldFetch(String),
    Skipped(SkipReason),
    Failed(GrabpodError),
}

#[derive(Debug)]
pub enum PodcastStatus {
    Processed,
    FeedUnavailable(GrabpodError),
    FeedUnparseable(GrabpodError),
}

#[derive(Debug)]
pub struct PodcastReport {
    pub alias: String,
    pub status: PodcastStatus,
    pub outcomes: Vec<FetchOutcome>,
}

impl PodcastReport {
    pub fn new(alias: impl Into<String>, status: PodcastStatus) -> Self {
        Self {
            alias: alias.into(),
            status,
            outcomes: Vec::new(),
        }
    }
}

/// Totals across a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub podcasts: usize,
    pub feed_errors: usize,
    pub fetched: usize,
    pub would_fetch: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &PodcastReport) {
        self.podcasts += 1;
        if !matches!(report.status, PodcastStatus::Processed) {
            self.feed_errors += 1;
        }
        for outcome in &report.outcomes {
            match outcome {
                FetchOutcome::Fetched(_) => self.fetched += 1,
                FetchOutcome::WouldFetch(_) => self.would_fetch += 1,
                FetchOutcome::Skipped(_) => self.skipped += 1,
                FetchOutcome::Failed(_) => self.failed += 1,
            }
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} podcasts: {} fetched, {} would fetch, {} skipped, {} failed, {} feed errors",
            self.podcasts,
            self.fetched,
            self.would_fetch,
            self.skipped,
            self.failed,
            self.feed_errors
        )
    }
}
