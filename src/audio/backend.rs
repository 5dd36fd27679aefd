use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, HandleId, MediaBackend, MediaError, MediaEvent, Volume};

/// [`MediaBackend`] backed by `rodio` on a dedicated audio thread.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    pub fn spawn(audio_settings: &AudioSettings, events: Sender<MediaEvent>) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let join = spawn_audio_thread(rx, events, audio_settings.clone());
        Self {
            tx,
            join: Some(join),
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), MediaError> {
        self.tx.send(cmd).map_err(|_| MediaError::Disconnected)
    }

    /// Stop the audio thread, fading out whatever is still playing.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            if h.join().is_err() {
                warn!("audio thread panicked");
            }
        }
    }
}

/// Map a locator to a local file path. Network sources are not supported.
pub(super) fn local_path(locator: &str) -> Result<PathBuf, MediaError> {
    let locator = locator.trim();
    if locator.is_empty() {
        return Err(MediaError::UnsupportedSource("empty locator".to_string()));
    }
    match locator.split_once("://") {
        Some(("file", rest)) => Ok(PathBuf::from(rest)),
        Some(_) => Err(MediaError::UnsupportedSource(locator.to_string())),
        None => Ok(PathBuf::from(locator)),
    }
}

impl MediaBackend for RodioBackend {
    fn open(&mut self, handle: HandleId, locator: &str, volume: Volume) -> Result<(), MediaError> {
        let path = local_path(locator)?;
        self.send(AudioCmd::Open {
            handle,
            path,
            volume,
        })
    }

    fn play(&mut self, handle: HandleId) -> Result<(), MediaError> {
        self.send(AudioCmd::Play(handle))
    }

    fn pause(&mut self, handle: HandleId) -> Result<(), MediaError> {
        self.send(AudioCmd::Pause(handle))
    }

    fn seek(&mut self, handle: HandleId, position: Duration) -> Result<(), MediaError> {
        self.send(AudioCmd::Seek(handle, position))
    }

    fn set_volume(&mut self, handle: HandleId, volume: Volume) -> Result<(), MediaError> {
        self.send(AudioCmd::SetVolume(handle, volume))
    }

    fn release(&mut self, handle: HandleId, fade_out: Duration) {
        let _ = self.send(AudioCmd::Release {
            handle,
            fade_out_ms: fade_out.as_millis() as u64,
        });
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.quit_softly(Duration::ZERO);
    }
}
