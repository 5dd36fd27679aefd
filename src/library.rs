//! Track data source: the immutable, ordered playlist the player works from.
//!
//! A playlist either comes from a TOML playlist file or from scanning a
//! directory of audio files. Both produce the same [`Playlist`] value.

mod display;
mod error;
mod model;
mod playlist_file;
mod scan;

pub use display::{display_from_fields, format_clock};
pub use error::LibraryError;
pub use model::{Playlist, Track, TrackId};
pub use playlist_file::{load_playlist_file, parse_playlist};
pub use scan::scan;

use std::path::Path;

use crate::config::LibrarySettings;

/// Load a playlist from `source`, which may be a playlist file or a directory.
pub fn load(source: &Path, settings: &LibrarySettings) -> Result<Playlist, LibraryError> {
    if source.is_dir() {
        let tracks = scan(source, settings);
        let name = source
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("library")
            .to_string();
        Playlist::new(name, tracks)
    } else {
        load_playlist_file(source, settings)
    }
}

#[cfg(test)]
mod tests;
