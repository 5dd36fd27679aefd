use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::error::LibraryError;

/// Stable identifier of a track, unique within its playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One playable audio item.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Display-only duration; the media handle reports the real one once loaded.
    pub duration_label: String,
    /// Locator of the playable asset. `None` marks a placeholder track.
    pub audio_source: Option<String>,
    pub cover_art_source: Option<String>,
    /// Duration probed from the file tags, if any.
    pub duration: Option<Duration>,
    pub display: String,
}

impl Track {
    pub fn has_audio(&self) -> bool {
        self.audio_source
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

/// The ordered track sequence for a session.
///
/// Cloning is cheap and never copies tracks; the sequence cannot be changed
/// once built.
#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    tracks: Arc<[Track]>,
}

impl Playlist {
    /// Build a playlist, rejecting empty or duplicate track ids.
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Result<Self, LibraryError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(tracks.len());
        for (index, track) in tracks.iter().enumerate() {
            if track.id.as_str().trim().is_empty() {
                return Err(LibraryError::EmptyId { index });
            }
            if !seen.insert(track.id.as_str()) {
                return Err(LibraryError::DuplicateId(track.id.to_string()));
            }
        }

        Ok(Self {
            name: name.into(),
            tracks: tracks.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.position(id).map(|i| &self.tracks[i])
    }

    /// Return the track `step` positions away from `id`, wrapping around the
    /// sequence. Unknown ids resolve relative to the first track.
    pub fn neighbour(&self, id: Option<&TrackId>, step: isize) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len() as isize;
        let Some(pos) = id.and_then(|id| self.position(id)) else {
            return self.first();
        };
        let idx = (pos as isize + step).rem_euclid(len);
        self.tracks.get(idx as usize)
    }
}
