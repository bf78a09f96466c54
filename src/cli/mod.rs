pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::RunOverrides;

#[derive(Parser)]
#[command(name = "grabpod", version)]
#[command(about = "Elementary CLI podcatcher", long_about = None)]
pub struct Cli {
    /// Only download these podcasts
    #[arg(value_name = "PODCAST_NAME")]
    pub podcasts: Vec<String>,

    /// Download files to subdirectories of DIR
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Ignore the config file and download this many files from each podcast
    #[arg(short = 'n', long, value_name = "NUM")]
    pub number_to_download: Option<usize>,

    /// Download podcast lists and create directories, but don't download
    /// any audio files
    #[arg(short = 'x', long)]
    pub dry_run: bool,

    /// List podcast names from the config file
    #[arg(short, long)]
    pub list: bool,

    /// Read podcasts from FILE instead of ~/.config/grabpodrc.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> RunOverrides {
        RunOverrides {
            names: self.podcasts.clone(),
            dir: self.dir.clone(),
            number_to_download: self.number_to_download,
            dry_run: self.dry_run,
        }
    }
}
