//! Application model types: `App`, its options and the hit areas the
//! renderer hands back for mouse input.

use std::time::Duration;

use ratatui::layout::Rect;

use crate::audio::{MediaBackend, MediaEvent};
use crate::library::{Playlist, Track};
use crate::playback::{Coordinator, CoordinatorOptions, Intent, PlaybackState};
use crate::player::VolumeDrag;
use crate::playlist::PlaylistView;

/// Whether the UI loop should keep going.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The three transport buttons, left to right.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transport {
    Prev,
    Toggle,
    Next,
}

impl Transport {
    pub const ALL: [Transport; 3] = [Transport::Prev, Transport::Toggle, Transport::Next];
}

/// One clickable playlist row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowHit {
    pub area: Rect,
    /// Position in the playlist.
    pub index: usize,
}

/// Screen regions from the last frame, used to route mouse input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub volume_bar: Rect,
    pub progress_bar: Rect,
    pub transport: [Rect; 3],
    pub rows: Vec<RowHit>,
}

#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub coordinator: CoordinatorOptions,
    pub scrub_seconds: u64,
    pub volume_step: u8,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            coordinator: CoordinatorOptions::default(),
            scrub_seconds: 5,
            volume_step: 5,
        }
    }
}

/// The main application model.
pub struct App<B: MediaBackend> {
    pub coordinator: Coordinator<B>,
    pub playlist_view: PlaylistView,
    pub volume_drag: VolumeDrag,
    pub areas: HitAreas,
    pub details_window: bool,
    pub(super) pending_gg: bool,
    pub(super) scrub_seconds: u64,
    pub(super) volume_step: u8,
}

impl<B: MediaBackend> App<B> {
    /// Create a new `App` for `playlist`, playing through `backend`.
    pub fn new(playlist: Playlist, backend: B, options: AppOptions) -> Self {
        Self {
            coordinator: Coordinator::new(playlist.clone(), backend, options.coordinator),
            playlist_view: PlaylistView::new(playlist),
            volume_drag: VolumeDrag::default(),
            areas: HitAreas::default(),
            details_window: false,
            pending_gg: false,
            scrub_seconds: options.scrub_seconds,
            volume_step: options.volume_step,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        self.coordinator.state()
    }

    pub fn playlist(&self) -> &Playlist {
        self.playlist_view.playlist()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.coordinator.selected_track()
    }

    /// Position of the selected track in the playlist.
    pub fn selected_index(&self) -> Option<usize> {
        self.state()
            .selected
            .as_ref()
            .and_then(|id| self.playlist().position(id))
    }

    /// First show: start the first track if nothing is selected.
    pub fn mount(&mut self) {
        let intent = self.playlist_view.bootstrap(self.coordinator.state());
        self.dispatch(intent);
        if let Some(i) = self.selected_index() {
            self.playlist_view.set_cursor(i);
        }
    }

    pub fn dispatch(&mut self, intent: Option<Intent>) {
        if let Some(intent) = intent {
            self.coordinator.dispatch(intent);
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        self.coordinator.handle_media_event(event);
    }

    pub fn set_hit_areas(&mut self, areas: HitAreas) {
        self.areas = areas;
    }

    pub fn toggle_details_window(&mut self) {
        self.details_window = !self.details_window;
    }

    /// Release the media handle, fading out over `fade_out`.
    pub fn shutdown(&mut self, fade_out: Duration) {
        self.volume_drag.release();
        self.coordinator.unmount(fade_out);
    }
}
