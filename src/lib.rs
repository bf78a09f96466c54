//! # grabpod
//!
//! An elementary command-line podcatcher.
//!
//! ## Architecture
//!
//! Every configured podcast goes through the same sequential pipeline:
//!
//! ```text
//! Config → RunPlan → fetch feed.xml → select items → fetch enclosures
//! ```
//!
//! Files land in `<podcasts directory>/<alias>/`. A file that already exists
//! there is never downloaded again.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fetch everything the config asks for
//! grabpod
//!
//! # Only two podcasts, newest item of each, into another directory
//! grabpod -n 1 -d ~/podcasts day6 otm
//!
//! # See what would be downloaded
//! grabpod --dry-run
//! ```

/// Application context and error handling.
pub mod app;

/// Command-line interface using clap.
///
/// - positional podcast names restrict the run
/// - `--dir`, `--number-to-download`, `--dry-run`, `--list`, `--config`
pub mod cli;

/// JSON configuration file and per-run resolution.
///
/// Loads from `~/.config/grabpodrc.json`, creating an example file when it
/// is missing.
pub mod config;

/// Core domain models.
///
/// - [`PodcastSpec`](domain::PodcastSpec): one configured feed
/// - [`FeedItem`](domain::FeedItem): one feed entry and its enclosure
/// - [`FetchOutcome`](domain::FetchOutcome): what happened to an item
pub mod domain;

/// Per-item enclosure download with the existence check.
pub mod enclosure;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for downloading to a file
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed parsing and item selection.
///
/// Reads RSS 0.9x/1.0/2.0 and Atom via feed-rs.
pub mod normalizer;

/// Sequential orchestration over all podcasts of a run.
pub mod processor;
