//! Configuration management for grabpod.
//!
//! The podcast list is read from `~/.config/grabpodrc.json` at startup.
//! If the file doesn't exist, it is created and populated with an example
//! list of feeds.

pub mod plan;

pub use plan::{RunOverrides, RunPlan};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::PodcastSpec;

pub const CONFIG_FILE_NAME: &str = "grabpodrc.json";

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "podcasts directory")]
    pub podcasts_dir: PathBuf,
    pub podcasts: Vec<PodcastSpec>,
}

impl Default for Config {
    fn default() -> Self {
        let feeds: [(&str, &str, Option<usize>); 12] = [
            ("spokenwiki", "http://feeds.feedburner.com/SpokenWiki", Some(3)),
            ("adler", "http://www.npr.org/templates/rss/podlayer.php?id=2100166", Some(3)),
            (
                "baltimore_stories",
                "http://www.publicbroadcasting.net/wypr/.jukebox?action=viewPodcast&podcastId=16423",
                Some(4),
            ),
            ("day6", "http://www.cbc.ca/podcasting/includes/day6.xml", Some(2)),
            ("hdtgm", "http://rss.earwolf.com/how-did-this-get-made", Some(2)),
            ("maher", "http://www.hbo.com/podcasts/billmaher/podcast.xml", Some(3)),
            ("otm", "http://www.onthemedia.org/index.xml", Some(2)),
            ("totenberg", "http://www.npr.org/templates/rss/podlayer.php?id=2101289", None),
            ("waitwait", "http://www.npr.org/rss/podcast.php?id=35", None),
            ("wiretap", "http://www.cbc.ca/podcasting/includes/wiretap.xml", Some(4)),
            ("mefi", "http://feeds.feedburner.com/MeFiPodcast?format=xml", Some(2)),
            ("revolutions", "http://revolutionspodcast.libsyn.com/rss/", Some(3)),
        ];

        Self {
            podcasts_dir: PathBuf::from("/tmp/boo"),
            podcasts: feeds
                .into_iter()
                .map(|(alias, url, limit)| PodcastSpec {
                    alias: alias.to_string(),
                    feed_url: url.to_string(),
                    download_limit: limit,
                })
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// If the file doesn't exist, an example config is written there first.
    /// If the file exists but is invalid, returns an error.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            println!(
                "{} doesn't exist so creating and populating with an example",
                path.display()
            );
            Self::create_default_config(path)?;
        }

        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/grabpodrc.json`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Configured aliases in file order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.podcasts.iter().map(|p| p.alias.as_str())
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(&Self::default()).map_err(|e| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Aliases double as directory names, so each must be a single,
    /// non-empty path component and unique within the file.
    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for podcast in &self.podcasts {
            let alias = podcast.alias.as_str();
            if alias.trim().is_empty() {
                return Err("podcast alias must not be empty".into());
            }
            if alias == "." || alias == ".." || alias.contains(|c: char| c == '/' || c == '\\') {
                return Err(format!(
                    "podcast alias {:?} is not a valid directory name",
                    alias
                ));
            }
            if !seen.insert(alias) {
                return Err(format!("podcast alias {:?} appears more than once", alias));
            }
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid config file at {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}
