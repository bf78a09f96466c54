//! Per-item download step.
//!
//! Each selected item ends in exactly one [`FetchOutcome`]. Presence of the
//! destination file is the only completion marker: an existing file is never
//! requested again, overwritten or checked.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use url::Url;

use crate::app::Result;
use crate::domain::{FeedItem, FetchOutcome, SkipReason};
use crate::fetcher::Fetcher;

/// Suffix of the file a download streams into before it is complete.
const PARTIAL_SUFFIX: &str = ".part";

/// Last non-empty segment of the enclosure URL's path, if there is one.
pub fn destination_filename(enclosure_url: &str) -> Result<Option<String>> {
    let url = Url::parse(enclosure_url)?;
    Ok(url
        .path()
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(String::from))
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(OsString::new);
    name.push(PARTIAL_SUFFIX);
    dest.with_file_name(name)
}

pub async fn fetch_enclosure(
    fetcher: &(dyn Fetcher + Send + Sync),
    item: &FeedItem,
    alias_dir: &Path,
    dry_run: bool,
) -> FetchOutcome {
    let Some(url) = item.enclosure_url.as_deref() else {
        eprintln!("  No enclosure for\n  {}\n  skipping.", item.display_title());
        return FetchOutcome::Skipped(SkipReason::NoEnclosure);
    };

    let filename = match destination_filename(url) {
        Ok(Some(filename)) => filename,
        Ok(None) => {
            eprintln!("  No file name in {}, skipping.", url);
            return FetchOutcome::Skipped(SkipReason::NoFilename);
        }
        Err(e) => {
            eprintln!("  Bad enclosure URL {}: {}", url, e);
            return FetchOutcome::Failed(e);
        }
    };

    let dest = alias_dir.join(filename);
    if dest.exists() {
        println!("    {}\n    already exists, skipping.", dest.display());
        return FetchOutcome::Skipped(SkipReason::AlreadyExists(dest));
    }

    let title = item.display_title();
    if dry_run {
        println!("Would fetch\n  {}", title);
        return FetchOutcome::WouldFetch(title);
    }

    println!("Attempting to fetch\n  {}", title);
    let partial = partial_path(&dest);
    let result: Result<()> = match fetcher.fetch_to_file(url, &partial).await {
        Ok(_) => tokio::fs::rename(&partial, &dest)
            .await
            .map_err(Into::into),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => FetchOutcome::Fetched(dest),
        Err(e) => {
            if partial.exists() {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    tracing::warn!("Could not remove {}: {}", partial.display(), cleanup);
                }
            }
            tracing::warn!("Download of {} failed: {}", url, e);
            eprintln!("  Failed to fetch {}: {}", url, e);
            FetchOutcome::Failed(e)
        }
    }
}
