//! Utilities for creating `rodio` sinks from files on disk.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::MediaError;

/// A paused sink plus the decoder's idea of the total length.
pub(super) struct PreparedSink {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    gain: f32,
) -> Result<PreparedSink, MediaError> {
    let file = File::open(path).map_err(|e| MediaError::Open(format!("{}: {e}", path.display())))?;

    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| MediaError::Decode(format!("{}: {e}", path.display())))?;
    let duration = decoder.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(gain);
    sink.append(source);
    sink.pause();
    Ok(PreparedSink { sink, duration })
}
