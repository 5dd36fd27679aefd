//! The player side: exclusive owner of the media handle, plus the
//! transport and volume controls bound to [`PlaybackState`].

mod view;
mod volume;

pub use view::{LoadOutcome, MediaHandle, PlayerView};
pub use volume::{VolumeDrag, volume_at};

use crate::playback::{Intent, PlaybackState};

/// The transport button never decides play vs pause itself; it asks the
/// coordinator to flip whatever the selected track is doing.
pub fn transport_intent(state: &PlaybackState) -> Option<Intent> {
    state.selected.clone().map(Intent::TogglePlayPause)
}

#[cfg(test)]
mod tests;
