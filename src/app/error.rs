use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum GrabpodError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch feed for {alias}: {source}")]
    FeedFetch {
        alias: String,
        #[source]
        source: Box<GrabpodError>,
    },

    #[error("Failed to parse feed {}: {reason}", .path.display())]
    FeedParse { path: PathBuf, reason: String },

    #[error("Could not create {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GrabpodError>;
