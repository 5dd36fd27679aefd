use crate::app::App;
use crate::audio::MediaBackend;
use crate::mpris::MprisHandle;

pub fn update_mpris<B: MediaBackend>(mpris: &MprisHandle, app: &App<B>) {
    mpris.set_track_metadata(app.selected_index(), app.selected_track());
    mpris.set_playback(app.state().status);
}
