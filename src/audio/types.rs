//! Audio-related small types.
//!
//! This module defines the handle ids, volume, events and errors shared
//! between the media backend and the code that drives it.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Identity of one media handle. Every backend event carries the id of the
/// handle it belongs to, so events for a released handle can be told apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Output volume in percent, always within `0..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: Volume = Volume(100);

    /// Clamp `percent` into range.
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn from_i32(percent: i32) -> Self {
        Self(percent.clamp(0, 100) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Linear gain for the output sink.
    pub fn as_gain(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn step(self, delta: i32) -> Self {
        Self::from_i32(i32::from(self.0) + delta)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(70)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),
    #[error("could not open: {0}")]
    Open(String),
    #[error("could not decode: {0}")]
    Decode(String),
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
    /// Playback start refused by the environment.
    #[error("playback start was blocked")]
    Blocked,
    #[error("no such media handle")]
    NoHandle,
    #[error("audio thread is gone")]
    Disconnected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// The source decoded and a paused output is ready to start.
    Ready { duration: Option<Duration> },
    Progress { position: Duration },
    Ended,
    Failed(MediaError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub handle: HandleId,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(handle: HandleId, kind: MediaEventKind) -> Self {
        Self { handle, kind }
    }
}

/// The native playback primitive.
///
/// Calls never block on decoding or output; results arrive later as
/// [`MediaEvent`]s tagged with the handle id passed in here.
pub trait MediaBackend {
    fn open(&mut self, handle: HandleId, locator: &str, volume: Volume) -> Result<(), MediaError>;
    fn play(&mut self, handle: HandleId) -> Result<(), MediaError>;
    fn pause(&mut self, handle: HandleId) -> Result<(), MediaError>;
    fn seek(&mut self, handle: HandleId, position: Duration) -> Result<(), MediaError>;
    fn set_volume(&mut self, handle: HandleId, volume: Volume) -> Result<(), MediaError>;
    /// Stop and detach `handle`. Releasing an unknown handle is a no-op.
    fn release(&mut self, handle: HandleId, fade_out: Duration);
}

#[derive(Debug)]
pub(super) enum AudioCmd {
    Open {
        handle: HandleId,
        path: std::path::PathBuf,
        volume: Volume,
    },
    Play(HandleId),
    Pause(HandleId),
    Seek(HandleId, Duration),
    SetVolume(HandleId, Volume),
    Release { handle: HandleId, fade_out_ms: u64 },
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
