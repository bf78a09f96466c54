pub mod feed;
pub mod item;
pub mod outcome;
pub mod podcast;

pub use feed::FeedDocument;
pub use item::FeedItem;
pub use outcome::{FetchOutcome, PodcastReport, PodcastStatus, RunSummary, SkipReason};
pub use podcast::PodcastSpec;
