//! The playlist side: row model, keyboard cursor and intent emission.
//!
//! The view never touches the media handle. It only reads
//! [`PlaybackState`] and turns clicks and keys into [`Intent`]s.

use crate::library::{Playlist, Track, TrackId};
use crate::playback::{Intent, PlaybackState};

/// Per-row overlay for the active track.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RowMarker {
    /// Not the selected track.
    None,
    /// Selected and playing; clicking pauses.
    Playing,
    /// Selected but not playing; clicking plays.
    Paused,
}

impl RowMarker {
    pub fn glyph(self) -> &'static str {
        match self {
            RowMarker::None => " ",
            RowMarker::Playing => "⏸",
            RowMarker::Paused => "▶",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Two-digit, 1-based position ("01").
    pub index_label: String,
    pub title: String,
    pub artist: String,
    pub duration_label: String,
    pub marker: RowMarker,
}

impl Row {
    pub fn is_active(&self) -> bool {
        self.marker != RowMarker::None
    }
}

pub struct PlaylistView {
    playlist: Playlist,
    cursor: usize,
}

impl PlaylistView {
    pub fn new(playlist: Playlist) -> Self {
        Self {
            playlist,
            cursor: 0,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Switch to `id` and play it, unless it is already the playing track.
    pub fn select_and_play(&self, id: &TrackId, state: &PlaybackState) -> Option<Intent> {
        self.playlist.get(id)?;
        if state.is_selected(id) && state.is_playing() {
            return None;
        }
        Some(Intent::SelectAndPlay(id.clone()))
    }

    /// Flip play/pause on the selected track; any other track is selected
    /// and started instead.
    pub fn toggle_play_pause(&self, id: &TrackId, state: &PlaybackState) -> Option<Intent> {
        self.playlist.get(id)?;
        if state.is_selected(id) {
            Some(Intent::TogglePlayPause(id.clone()))
        } else {
            self.select_and_play(id, state)
        }
    }

    /// First-mount default: start the first track when nothing is selected.
    pub fn bootstrap(&self, state: &PlaybackState) -> Option<Intent> {
        if state.selected.is_some() {
            return None;
        }
        let first = self.playlist.first()?;
        Some(Intent::SelectAndPlay(first.id.clone()))
    }

    /// Select the track `step` positions away from the current one, wrapping.
    pub fn step_intent(&self, state: &PlaybackState, step: isize) -> Option<Intent> {
        let track = self.playlist.neighbour(state.selected.as_ref(), step)?;
        Some(Intent::SelectAndPlay(track.id.clone()))
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_track(&self) -> Option<&Track> {
        self.playlist.at(self.cursor)
    }

    pub fn set_cursor(&mut self, index: usize) {
        if index < self.playlist.len() {
            self.cursor = index;
        }
    }

    pub fn move_down(&mut self) {
        if !self.playlist.is_empty() {
            self.cursor = (self.cursor + 1) % self.playlist.len();
        }
    }

    pub fn move_up(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn top(&mut self) {
        self.cursor = 0;
    }

    pub fn bottom(&mut self) {
        self.cursor = self.playlist.len().saturating_sub(1);
    }

    /// Rows in playlist order. At most one row is active: the selected track.
    pub fn rows(&self, state: &PlaybackState) -> Vec<Row> {
        self.playlist
            .tracks()
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let marker = if !state.is_selected(&t.id) {
                    RowMarker::None
                } else if state.is_playing() {
                    RowMarker::Playing
                } else {
                    RowMarker::Paused
                };
                Row {
                    index_label: format!("{:02}", i + 1),
                    title: t.title.clone(),
                    artist: t.artist.clone(),
                    duration_label: t.duration_label.clone(),
                    marker,
                }
            })
            .collect()
    }
}
