use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::PodcastSpec;

/// Per-run settings supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    /// Only these aliases are processed when non-empty.
    pub names: Vec<String>,
    pub dir: Option<PathBuf>,
    pub number_to_download: Option<usize>,
    pub dry_run: bool,
}

/// Everything a run needs, resolved from the config file and overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub base_dir: PathBuf,
    /// Podcasts to process, in config file order.
    pub podcasts: Vec<PodcastSpec>,
    pub limit_override: Option<usize>,
    pub dry_run: bool,
    /// Requested names that match no configured alias.
    pub unknown_names: Vec<String>,
}

impl RunPlan {
    pub fn resolve(config: &Config, overrides: &RunOverrides) -> Self {
        let base_dir = expand_home(overrides.dir.as_deref().unwrap_or(&config.podcasts_dir));

        let podcasts = if overrides.names.is_empty() {
            config.podcasts.clone()
        } else {
            config
                .podcasts
                .iter()
                .filter(|p| overrides.names.contains(&p.alias))
                .cloned()
                .collect()
        };

        let unknown_names = overrides
            .names
            .iter()
            .filter(|name| !config.podcasts.iter().any(|p| &p.alias == *name))
            .cloned()
            .collect();

        Self {
            base_dir,
            podcasts,
            limit_override: overrides.number_to_download,
            dry_run: overrides.dry_run,
            unknown_names,
        }
    }

    /// Effective item limit: the command line wins over the config file.
    pub fn limit_for(&self, podcast: &PodcastSpec) -> Option<usize> {
        self.limit_override.or(podcast.download_limit)
    }

    pub fn alias_dir(&self, podcast: &PodcastSpec) -> PathBuf {
        self.base_dir.join(&podcast.alias)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
