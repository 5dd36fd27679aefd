//! In-memory [`MediaBackend`] that records every call.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::types::{HandleId, MediaBackend, MediaError, Volume};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open {
        handle: HandleId,
        locator: String,
        volume: Volume,
    },
    Play(HandleId),
    Pause(HandleId),
    Seek(HandleId, Duration),
    SetVolume(HandleId, Volume),
    Release(HandleId, Duration),
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<Call>,
    failing_sources: Vec<String>,
    play_blocked: bool,
}

/// Cloning shares the same log, so a test can keep a probe while the
/// coordinator owns the backend.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    inner: Rc<RefCell<Recorder>>,
}

impl RecordingBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// `open` for this locator fails synchronously.
    pub fn fail_source(&self, locator: &str) {
        self.inner
            .borrow_mut()
            .failing_sources
            .push(locator.to_string());
    }

    /// `play` answers `Blocked` while set.
    pub fn block_play(&self, blocked: bool) {
        self.inner.borrow_mut().play_blocked = blocked;
    }

    pub fn opened(&self) -> Vec<(HandleId, String, Volume)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Open {
                    handle,
                    locator,
                    volume,
                } => Some((handle, locator, volume)),
                _ => None,
            })
            .collect()
    }

    pub fn last_handle(&self) -> Option<HandleId> {
        self.opened().last().map(|(h, _, _)| *h)
    }

    pub fn plays_of(&self, handle: HandleId) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::Play(handle))
            .count()
    }

    pub fn released(&self, handle: HandleId) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c, Call::Release(h, _) if *h == handle))
    }

    /// Index of the first call matching `pred`.
    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls().iter().position(pred)
    }

    fn record(&self, call: Call) {
        self.inner.borrow_mut().calls.push(call);
    }
}

impl MediaBackend for RecordingBackend {
    fn open(&mut self, handle: HandleId, locator: &str, volume: Volume) -> Result<(), MediaError> {
        self.record(Call::Open {
            handle,
            locator: locator.to_string(),
            volume,
        });
        if self
            .inner
            .borrow()
            .failing_sources
            .iter()
            .any(|s| s == locator)
        {
            return Err(MediaError::Open(locator.to_string()));
        }
        Ok(())
    }

    fn play(&mut self, handle: HandleId) -> Result<(), MediaError> {
        self.record(Call::Play(handle));
        if self.inner.borrow().play_blocked {
            return Err(MediaError::Blocked);
        }
        Ok(())
    }

    fn pause(&mut self, handle: HandleId) -> Result<(), MediaError> {
        self.record(Call::Pause(handle));
        Ok(())
    }

    fn seek(&mut self, handle: HandleId, position: Duration) -> Result<(), MediaError> {
        self.record(Call::Seek(handle, position));
        Ok(())
    }

    fn set_volume(&mut self, handle: HandleId, volume: Volume) -> Result<(), MediaError> {
        self.record(Call::SetVolume(handle, volume));
        Ok(())
    }

    fn release(&mut self, handle: HandleId, fade_out: Duration) {
        self.record(Call::Release(handle, fade_out));
    }
}
