use crate::library::TrackId;

/// What a view asks the coordinator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Switch to the track and play it.
    SelectAndPlay(TrackId),
    /// Flip play/pause if the track is the selected one, otherwise select it.
    TogglePlayPause(TrackId),
}

impl Intent {
    pub fn track_id(&self) -> &TrackId {
        match self {
            Intent::SelectAndPlay(id) | Intent::TogglePlayPause(id) => id,
        }
    }
}
