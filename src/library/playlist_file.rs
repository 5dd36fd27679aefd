use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::LibrarySettings;

use super::display::{display_from_fields, format_clock};
use super::error::LibraryError;
use super::model::{Playlist, Track, TrackId};
use super::scan::probe_tags;

/// On-disk playlist format.
///
/// ```toml
/// name = "Evening"
///
/// [[tracks]]
/// id = "1"
/// title = "Get Wid Lemonade"
/// artist = "Artist Name"
/// album = "Collection"
/// duration = "3:30"
/// audio = "music/lemonade.mp3"
/// cover_art = "art/lemonade.png"
/// ```
#[derive(Debug, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tracks: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    id: TrackId,
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    album: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    audio: Option<String>,
    #[serde(default)]
    cover_art: Option<String>,
}

fn is_remote(locator: &str) -> bool {
    locator.contains("://")
}

/// Resolve a locator relative to the playlist's directory. Remote and
/// absolute locators are kept as written; blank ones become `None`.
fn resolve_locator(raw: Option<String>, base_dir: &Path) -> Option<String> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_remote(trimmed) || Path::new(trimmed).is_absolute() {
        return Some(trimmed.to_string());
    }
    Some(base_dir.join(trimmed).to_string_lossy().into_owned())
}

/// Parse playlist text. Relative locators resolve against `base_dir`.
pub fn parse_playlist(
    text: &str,
    base_dir: &Path,
    settings: &LibrarySettings,
) -> Result<Playlist, LibraryError> {
    let file: PlaylistFile = toml::from_str(text).map_err(|source| LibraryError::Parse {
        path: base_dir.to_path_buf(),
        source,
    })?;

    let tracks = file
        .tracks
        .into_iter()
        .map(|entry| {
            let audio_source = resolve_locator(entry.audio, base_dir);
            let cover_art_source = resolve_locator(entry.cover_art, base_dir);

            // Probe local files only; a missing file is reported when it is loaded.
            let duration = audio_source
                .as_deref()
                .filter(|l| !is_remote(l))
                .map(Path::new)
                .filter(|p| p.is_file())
                .and_then(|p| probe_tags(p).duration);

            let duration_label = if entry.duration.trim().is_empty() {
                duration.map(format_clock).unwrap_or_default()
            } else {
                entry.duration.trim().to_string()
            };

            let display = display_from_fields(
                audio_source.as_deref(),
                &entry.title,
                &entry.artist,
                &entry.album,
                &settings.display_fields,
                &settings.display_separator,
            );

            Track {
                id: entry.id,
                title: entry.title,
                artist: entry.artist,
                album: entry.album,
                duration_label,
                audio_source,
                cover_art_source,
                duration,
                display,
            }
        })
        .collect::<Vec<_>>();

    debug!(count = tracks.len(), "parsed playlist");
    Playlist::new(file.name.unwrap_or_else(|| "playlist".to_string()), tracks)
}

/// Read and parse the playlist file at `path`.
pub fn load_playlist_file(path: &Path, settings: &LibrarySettings) -> Result<Playlist, LibraryError> {
    let text = fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let playlist = parse_playlist(&text, base_dir, settings).map_err(|e| match e {
        LibraryError::Parse { source, .. } => LibraryError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!(path = %path.display(), tracks = playlist.len(), "loaded playlist");
    Ok(playlist)
}
