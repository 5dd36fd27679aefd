use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::audio::{MediaBackend, MediaError, MediaEvent, MediaEventKind, Volume};
use crate::library::{Playlist, Track, TrackId};
use crate::player::{LoadOutcome, PlayerView};

use super::intent::Intent;
use super::state::{PlaybackState, PlayerStatus};

/// Knobs that come from configuration and the command line.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorOptions {
    pub volume: Volume,
    /// Start playback as soon as a handle is ready.
    pub autoplay: bool,
    /// Fade applied when a handle is replaced.
    pub release_fade: Duration,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            volume: Volume::default(),
            autoplay: true,
            release_fade: Duration::ZERO,
        }
    }
}

/// Owns [`PlaybackState`] and applies the transition rules.
///
/// Media failures never escape: they land in `PlaybackState::error` and the
/// state falls back to `Idle` with the track still selected.
pub struct Coordinator<B: MediaBackend> {
    playlist: Playlist,
    state: PlaybackState,
    player: PlayerView<B>,
    autoplay: bool,
}

impl<B: MediaBackend> Coordinator<B> {
    pub fn new(playlist: Playlist, backend: B, options: CoordinatorOptions) -> Self {
        Self {
            playlist,
            state: PlaybackState::new(options.volume),
            player: PlayerView::new(backend, options.release_fade),
            autoplay: options.autoplay,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn player(&self) -> &PlayerView<B> {
        &self.player
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.state
            .selected
            .as_ref()
            .and_then(|id| self.playlist.get(id))
    }

    pub fn dispatch(&mut self, intent: Intent) {
        trace!(?intent, status = %self.state.status, "dispatch");
        match intent {
            Intent::SelectAndPlay(id) => self.select_and_play(&id),
            Intent::TogglePlayPause(id) => {
                if self.state.is_selected(&id) {
                    self.toggle();
                } else {
                    self.select_and_play(&id);
                }
            }
        }
    }

    fn select_and_play(&mut self, id: &TrackId) {
        let Some(track) = self.playlist.get(id).cloned() else {
            warn!(track = %id, "intent for unknown track");
            return;
        };

        if !self.state.is_selected(id) {
            self.load(&track);
            return;
        }
        match self.state.status {
            // Already on its way; a repeated click changes nothing.
            PlayerStatus::Playing | PlayerStatus::Loading => {}
            PlayerStatus::Paused => self.resume(),
            PlayerStatus::Ended => self.restart(),
            PlayerStatus::Idle => self.load(&track),
        }
    }

    fn toggle(&mut self) {
        match self.state.status {
            PlayerStatus::Playing => self.pause(),
            PlayerStatus::Paused => self.resume(),
            PlayerStatus::Ended => self.restart(),
            PlayerStatus::Loading => trace!("toggle ignored while loading"),
            PlayerStatus::Idle => {
                if let Some(track) = self.selected_track().cloned() {
                    self.load(&track);
                }
            }
        }
    }

    fn set_status(&mut self, to: PlayerStatus) {
        if self.state.status != to {
            debug!(from = %self.state.status, %to, "transition");
            self.state.status = to;
        }
    }

    fn load(&mut self, track: &Track) {
        self.state.selected = Some(track.id.clone());
        self.state.progress = Duration::ZERO;
        self.state.duration = track.duration;
        self.state.error = None;
        self.set_status(PlayerStatus::Loading);

        match self.player.enter_loading(track, self.state.volume) {
            LoadOutcome::Attached(_) => {}
            LoadOutcome::NoSource => {
                debug!(track = %track.id, "track has no audio source");
                self.set_status(PlayerStatus::Idle);
            }
            LoadOutcome::Failed(e) => self.fail(e),
        }
    }

    fn pause(&mut self) {
        match self.player.pause() {
            Ok(()) => self.set_status(PlayerStatus::Paused),
            Err(e) => self.fail(e),
        }
    }

    /// Start the attached handle; a refused start leaves it paused.
    fn resume(&mut self) {
        match self.player.start() {
            Ok(()) => self.set_status(PlayerStatus::Playing),
            Err(MediaError::Blocked) => {
                debug!("playback start blocked; waiting for an explicit play");
                self.set_status(PlayerStatus::Paused);
            }
            Err(e) => self.fail(e),
        }
    }

    fn restart(&mut self) {
        self.state.progress = Duration::ZERO;
        match self.player.restart() {
            Ok(()) => self.set_status(PlayerStatus::Playing),
            Err(MediaError::Blocked) => self.set_status(PlayerStatus::Paused),
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: MediaError) {
        warn!(track = ?self.state.selected, %error, "can't play track");
        self.player.release();
        self.state.progress = Duration::ZERO;
        self.state.error = Some(error.to_string());
        self.set_status(PlayerStatus::Idle);
    }

    /// Apply one event from the media layer.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if !self.player.owns(event.handle) {
            trace!(handle = %event.handle, kind = ?event.kind, "stale media event");
            return;
        }

        match event.kind {
            MediaEventKind::Ready { duration } => {
                if self.state.status != PlayerStatus::Loading {
                    return;
                }
                self.state.duration = duration.or(self.state.duration);
                if self.autoplay {
                    self.resume();
                } else {
                    self.set_status(PlayerStatus::Paused);
                }
            }
            MediaEventKind::Progress { position } => {
                if self.state.is_playing() {
                    self.state.progress = self.clamp_position(position);
                }
            }
            MediaEventKind::Ended => {
                if matches!(
                    self.state.status,
                    PlayerStatus::Playing | PlayerStatus::Paused
                ) {
                    self.state.progress = Duration::ZERO;
                    self.set_status(PlayerStatus::Ended);
                    if let Err(e) = self.player.rewind() {
                        self.fail(e);
                    }
                }
            }
            MediaEventKind::Failed(e) => self.fail(e),
        }
    }

    fn clamp_position(&self, position: Duration) -> Duration {
        match self.state.duration {
            Some(d) => position.min(d),
            None => position,
        }
    }

    /// Volume is independent of the track and never changes the status.
    pub fn set_volume(&mut self, volume: Volume) {
        self.state.volume = volume;
        self.player.apply_volume(volume);
    }

    pub fn adjust_volume(&mut self, delta: i32) {
        self.set_volume(self.state.volume.step(delta));
    }

    /// Jump to `position` in the current track. Only honoured while playing
    /// or paused.
    pub fn seek_to(&mut self, position: Duration) {
        if !matches!(
            self.state.status,
            PlayerStatus::Playing | PlayerStatus::Paused
        ) {
            return;
        }
        let position = self.clamp_position(position);
        match self.player.seek(position) {
            Ok(()) => self.state.progress = position,
            Err(e) => self.fail(e),
        }
    }

    pub fn seek_by(&mut self, seconds: i64) {
        let delta = Duration::from_secs(seconds.unsigned_abs());
        let target = if seconds < 0 {
            self.state.progress.saturating_sub(delta)
        } else {
            self.state.progress + delta
        };
        self.seek_to(target);
    }

    /// Seek to a fraction of the known duration.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if let Some(d) = self.state.duration {
            self.seek_to(d.mul_f64(fraction.clamp(0.0, 1.0)));
        }
    }

    /// Release the handle for good, e.g. on quit.
    pub fn unmount(&mut self, fade_out: Duration) {
        self.player.unmount(fade_out);
        self.state.progress = Duration::ZERO;
        self.set_status(PlayerStatus::Idle);
    }
}
