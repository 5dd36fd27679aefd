use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, trace, warn};

use crate::config::AudioSettings;

use super::clock::PlaybackClock;
use super::sink::create_sink_at;
use super::types::{AudioCmd, HandleId, MediaError, MediaEvent, MediaEventKind, Volume};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<MediaEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!(error = %e, "no audio output device; every track will fail to load");
                None
            }
        };

        let interval = Duration::from_millis(audio_settings.progress_interval_ms.max(1));
        let mut worker = AudioWorker::new(stream, events);
        let mut next_tick = Instant::now() + interval;

        loop {
            let now = Instant::now();
            if now >= next_tick {
                worker.tick(now);
                next_tick = now + interval;
            }

            match rx.recv_timeout(next_tick.saturating_duration_since(Instant::now())) {
                Ok(cmd) => {
                    if !worker.handle(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    worker.stop_now();
                    break;
                }
            }
        }
        debug!("audio thread exiting");
    })
}

/// The one handle the audio thread is currently bound to.
struct Loaded {
    handle: HandleId,
    path: PathBuf,
    sink: Sink,
    clock: PlaybackClock,
    volume: Volume,
}

/// State owned by the audio thread. Split from the thread body so the
/// command handling can run without an output device.
pub(super) struct AudioWorker {
    stream: Option<OutputStream>,
    loaded: Option<Loaded>,
    events: Sender<MediaEvent>,
}

impl AudioWorker {
    pub fn new(stream: Option<OutputStream>, events: Sender<MediaEvent>) -> Self {
        Self {
            stream,
            loaded: None,
            events,
        }
    }

    fn emit(&self, handle: HandleId, kind: MediaEventKind) {
        if self.events.send(MediaEvent::new(handle, kind)).is_err() {
            trace!(%handle, "event receiver gone");
        }
    }

    /// The live handle, if it is `handle`.
    fn bound(&mut self, handle: HandleId) -> Option<&mut Loaded> {
        match self.loaded.as_mut() {
            Some(l) if l.handle == handle => Some(l),
            _ => {
                trace!(%handle, "command for a handle that is not loaded");
                None
            }
        }
    }

    /// Apply one command. Returns `false` once the thread should exit.
    pub fn handle(&mut self, cmd: AudioCmd) -> bool {
        let now = Instant::now();
        match cmd {
            AudioCmd::Open {
                handle,
                path,
                volume,
            } => {
                // Only one handle is ever live; a stray one is cut off.
                self.stop_now();

                let Some(stream) = self.stream.as_ref() else {
                    self.emit(
                        handle,
                        MediaEventKind::Failed(MediaError::NoOutputDevice(
                            "default output could not be opened".to_string(),
                        )),
                    );
                    return true;
                };

                match create_sink_at(stream, &path, Duration::ZERO, volume.as_gain()) {
                    Ok(prepared) => {
                        debug!(%handle, path = %path.display(), "opened");
                        self.loaded = Some(Loaded {
                            handle,
                            path,
                            sink: prepared.sink,
                            clock: PlaybackClock::default(),
                            volume,
                        });
                        self.emit(
                            handle,
                            MediaEventKind::Ready {
                                duration: prepared.duration,
                            },
                        );
                    }
                    Err(e) => {
                        warn!(%handle, error = %e, "open failed");
                        self.emit(handle, MediaEventKind::Failed(e));
                    }
                }
            }
            AudioCmd::Play(handle) => {
                if let Some(l) = self.bound(handle) {
                    l.sink.play();
                    l.clock.start(now);
                }
            }
            AudioCmd::Pause(handle) => {
                if let Some(l) = self.bound(handle) {
                    l.sink.pause();
                    l.clock.pause(now);
                }
            }
            AudioCmd::Seek(handle, position) => self.seek(handle, position, now),
            AudioCmd::SetVolume(handle, volume) => {
                if let Some(l) = self.bound(handle) {
                    l.sink.set_volume(volume.as_gain());
                    l.volume = volume;
                }
            }
            AudioCmd::Release {
                handle,
                fade_out_ms,
            } => {
                if self.bound(handle).is_some() {
                    if let Some(l) = self.loaded.take() {
                        if l.clock.is_running() {
                            fade_out_sink(&l.sink, l.volume, fade_out_ms);
                        }
                        l.sink.stop();
                        debug!(%handle, "released");
                    }
                }
            }
            AudioCmd::Quit { fade_out_ms } => {
                if let Some(l) = self.loaded.take() {
                    if l.clock.is_running() {
                        fade_out_sink(&l.sink, l.volume, fade_out_ms);
                    }
                    l.sink.stop();
                }
                return false;
            }
        }
        true
    }

    fn seek(&mut self, handle: HandleId, position: Duration, now: Instant) {
        let Some(stream) = self.stream.as_ref() else {
            return;
        };
        let Some(l) = self.loaded.as_mut().filter(|l| l.handle == handle) else {
            trace!(%handle, "seek for a handle that is not loaded");
            return;
        };

        // Scrubbing: rebuild the current sink and skip into the file.
        // This uses `Source::skip_duration` (works for common formats).
        l.sink.stop();
        match create_sink_at(stream, &l.path, position, l.volume.as_gain()) {
            Ok(prepared) => {
                if l.clock.is_running() {
                    prepared.sink.play();
                }
                l.sink = prepared.sink;
                l.clock.set(position, now);
            }
            Err(e) => {
                warn!(%handle, error = %e, "seek failed");
                self.loaded = None;
                self.emit(handle, MediaEventKind::Failed(e));
            }
        }
    }

    /// Periodic progress / end-of-track detection.
    pub fn tick(&mut self, now: Instant) {
        let Some(l) = self.loaded.as_mut() else {
            return;
        };
        if !l.clock.is_running() {
            return;
        }

        let handle = l.handle;
        if l.sink.empty() {
            l.clock.pause(now);
            self.emit(handle, MediaEventKind::Ended);
        } else {
            let position = l.clock.elapsed_at(now);
            self.emit(handle, MediaEventKind::Progress { position });
        }
    }

    pub fn stop_now(&mut self) {
        if let Some(l) = self.loaded.take() {
            l.sink.stop();
        }
    }
}

fn fade_out_sink(sink: &Sink, volume: Volume, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let start = volume.as_gain();
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
