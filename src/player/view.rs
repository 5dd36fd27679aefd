use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::{HandleId, MediaBackend, MediaError, Volume};
use crate::library::Track;

/// The live playable resource for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle {
    pub id: HandleId,
    pub source: String,
}

/// Result of binding a track to a new handle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Attached(HandleId),
    /// The track has no audio; nothing was constructed.
    NoSource,
    Failed(MediaError),
}

/// Owns the backend and at most one [`MediaHandle`].
///
/// The previous handle is always released before a new one is opened, and
/// the live one is released when the view is dropped.
pub struct PlayerView<B: MediaBackend> {
    backend: B,
    current: Option<MediaHandle>,
    next_id: u64,
    release_fade: Duration,
}

impl<B: MediaBackend> PlayerView<B> {
    pub fn new(backend: B, release_fade: Duration) -> Self {
        Self {
            backend,
            current: None,
            next_id: 0,
            release_fade,
        }
    }

    pub fn handle(&self) -> Option<&MediaHandle> {
        self.current.as_ref()
    }

    /// Whether events from `id` still concern us.
    pub fn owns(&self, id: HandleId) -> bool {
        self.current.as_ref().is_some_and(|h| h.id == id)
    }

    fn current_id(&self) -> Result<HandleId, MediaError> {
        self.current.as_ref().map(|h| h.id).ok_or(MediaError::NoHandle)
    }

    /// Release whatever is attached, then open `track` at `volume`.
    pub fn enter_loading(&mut self, track: &Track, volume: Volume) -> LoadOutcome {
        self.release();

        let Some(source) = track.audio_source.as_deref().filter(|_| track.has_audio()) else {
            return LoadOutcome::NoSource;
        };
        let source = source.trim();

        self.next_id += 1;
        let id = HandleId(self.next_id);
        match self.backend.open(id, source, volume) {
            Ok(()) => {
                debug!(handle = %id, track = %track.id, "handle attached");
                self.current = Some(MediaHandle {
                    id,
                    source: source.to_string(),
                });
                LoadOutcome::Attached(id)
            }
            Err(e) => LoadOutcome::Failed(e),
        }
    }

    pub fn start(&mut self) -> Result<(), MediaError> {
        let id = self.current_id()?;
        self.backend.play(id)
    }

    pub fn pause(&mut self) -> Result<(), MediaError> {
        let id = self.current_id()?;
        self.backend.pause(id)
    }

    /// Pause in place and go back to the beginning.
    pub fn rewind(&mut self) -> Result<(), MediaError> {
        let id = self.current_id()?;
        self.backend.pause(id)?;
        self.backend.seek(id, Duration::ZERO)
    }

    /// Play again from the beginning.
    pub fn restart(&mut self) -> Result<(), MediaError> {
        let id = self.current_id()?;
        self.backend.seek(id, Duration::ZERO)?;
        self.backend.play(id)
    }

    pub fn seek(&mut self, position: Duration) -> Result<(), MediaError> {
        let id = self.current_id()?;
        self.backend.seek(id, position)
    }

    /// Push a volume change to the live handle, if any. Volume never
    /// affects playback state, so a failure here is only logged.
    pub fn apply_volume(&mut self, volume: Volume) {
        if let Some(h) = self.current.as_ref() {
            if let Err(e) = self.backend.set_volume(h.id, volume) {
                warn!(handle = %h.id, error = %e, "failed to apply volume");
            }
        }
    }

    /// Stop and detach the live handle.
    pub fn release(&mut self) {
        let fade = self.release_fade;
        self.release_with(fade);
    }

    /// Release for good, fading out over `fade_out`.
    pub fn unmount(&mut self, fade_out: Duration) {
        self.release_with(fade_out);
    }

    fn release_with(&mut self, fade_out: Duration) {
        if let Some(h) = self.current.take() {
            debug!(handle = %h.id, source = %h.source, "handle released");
            self.backend.release(h.id, fade_out);
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: MediaBackend> Drop for PlayerView<B> {
    fn drop(&mut self) {
        self.release_with(Duration::ZERO);
    }
}
