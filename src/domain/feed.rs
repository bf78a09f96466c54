use std::path::{Path, PathBuf};

/// Name of the stored feed document inside each podcast directory.
pub const FEED_FILE_NAME: &str = "feed.xml";

/// A feed document that has been written to disk.
///
/// The file is authoritative once written. Every run fetches it again and
/// replaces it in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub storage_path: PathBuf,
    pub size: u64,
}

impl FeedDocument {
    pub fn storage_path_for(alias_dir: &Path) -> PathBuf {
        alias_dir.join(FEED_FILE_NAME)
    }
}
