//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "encore")]
#[command(about = "A terminal audio player for a fixed playlist", version)]
pub struct Args {
    /// Playlist file (TOML) or a directory of audio files.
    pub source: Option<PathBuf>,

    /// Config file to use instead of the XDG default.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Starting volume, 0-100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: Option<u8>,

    /// Wait for an explicit play instead of starting tracks when they load.
    #[arg(long)]
    pub no_autoplay: bool,

    /// `tracing` filter directive for the log file (RUST_LOG wins).
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Args {
    /// Fold command-line values over loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(v) = self.volume {
            settings.audio.initial_volume = v;
        }
        if self.no_autoplay {
            settings.playback.autoplay = false;
        }
        if let Some(f) = &self.log_filter {
            settings.logging.filter = f.clone();
        }
    }
}
