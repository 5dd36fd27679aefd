use std::fmt;
use std::time::Duration;

use crate::audio::Volume;
use crate::library::TrackId;

/// Where the selected track is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    /// Nothing loaded: no selection yet, a track without audio, or a failure.
    #[default]
    Idle,
    /// A handle is attached but not ready to play.
    Loading,
    Playing,
    Paused,
    /// Playback reached the end of the asset.
    Ended,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerStatus::Idle => "idle",
            PlayerStatus::Loading => "loading",
            PlayerStatus::Playing => "playing",
            PlayerStatus::Paused => "paused",
            PlayerStatus::Ended => "ended",
        };
        f.write_str(s)
    }
}

/// The single source of truth for playback, read by every view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    pub selected: Option<TrackId>,
    pub status: PlayerStatus,
    /// Observed from the media handle.
    pub progress: Duration,
    /// Known once the handle is ready, or from the track's probed length.
    pub duration: Option<Duration>,
    pub volume: Volume,
    /// User-facing message for the last load failure.
    pub error: Option<String>,
}

impl PlaybackState {
    pub fn new(volume: Volume) -> Self {
        Self {
            volume,
            ..Self::default()
        }
    }

    /// True exactly in [`PlayerStatus::Playing`].
    pub fn is_playing(&self) -> bool {
        self.status == PlayerStatus::Playing
    }

    pub fn is_selected(&self, id: &TrackId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Progress as `0.0..=1.0`, or zero while the duration is unknown.
    pub fn progress_ratio(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => {
                (self.progress.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}
