use std::path::PathBuf;
use std::time::Duration;

use crate::app::AppOptions;
use crate::audio::Volume;
use crate::config;
use crate::playback::CoordinatorOptions;

/// Translate loaded settings into the options the app is built with.
pub fn app_options(settings: &config::Settings) -> AppOptions {
    AppOptions {
        coordinator: CoordinatorOptions {
            volume: Volume::new(settings.audio.initial_volume),
            autoplay: settings.playback.autoplay,
            release_fade: Duration::from_millis(settings.audio.release_fade_ms),
        },
        scrub_seconds: settings.controls.scrub_seconds,
        volume_step: settings.audio.volume_step,
    }
}

/// Playlist source: the command line, then `library.playlist`, then the
/// working directory.
pub fn resolve_source(arg: Option<PathBuf>, settings: &config::Settings) -> PathBuf {
    arg.or_else(|| settings.library.playlist.clone())
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
