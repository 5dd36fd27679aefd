use std::time::Duration;

use ratatui::layout::Rect;

use super::*;
use crate::audio::testing::{Call, RecordingBackend};
use crate::audio::{HandleId, MediaError, Volume};
use crate::library::{Track, TrackId};
use crate::playback::{Intent, PlaybackState, PlayerStatus};

fn track(id: &str, audio: Option<&str>) -> Track {
    Track {
        id: TrackId::new(id),
        title: id.to_string(),
        artist: String::new(),
        album: String::new(),
        duration_label: String::new(),
        audio_source: audio.map(str::to_string),
        cover_art_source: None,
        duration: None,
        display: id.to_string(),
    }
}

fn view() -> (PlayerView<RecordingBackend>, RecordingBackend) {
    let backend = RecordingBackend::default();
    let probe = backend.clone();
    (PlayerView::new(backend, Duration::from_millis(50)), probe)
}

#[test]
fn enter_loading_releases_previous_handle_first() {
    let (mut v, probe) = view();
    assert_eq!(
        v.enter_loading(&track("a", Some("a.mp3")), Volume::new(30)),
        LoadOutcome::Attached(HandleId(1))
    );
    assert_eq!(
        v.enter_loading(&track("b", Some("b.mp3")), Volume::new(30)),
        LoadOutcome::Attached(HandleId(2))
    );

    assert_eq!(
        probe.calls(),
        vec![
            Call::Open {
                handle: HandleId(1),
                locator: "a.mp3".into(),
                volume: Volume::new(30),
            },
            Call::Release(HandleId(1), Duration::from_millis(50)),
            Call::Open {
                handle: HandleId(2),
                locator: "b.mp3".into(),
                volume: Volume::new(30),
            },
        ]
    );
    assert!(v.owns(HandleId(2)));
    assert!(!v.owns(HandleId(1)));
}

#[test]
fn blank_source_constructs_nothing() {
    let (mut v, probe) = view();
    assert_eq!(
        v.enter_loading(&track("a", Some("   ")), Volume::default()),
        LoadOutcome::NoSource
    );
    assert_eq!(
        v.enter_loading(&track("b", None), Volume::default()),
        LoadOutcome::NoSource
    );
    assert!(probe.calls().is_empty());
    assert!(v.handle().is_none());
}

#[test]
fn failed_open_leaves_no_handle_and_ids_are_not_reused() {
    let (mut v, probe) = view();
    probe.fail_source("bad.mp3");
    assert!(matches!(
        v.enter_loading(&track("a", Some("bad.mp3")), Volume::default()),
        LoadOutcome::Failed(MediaError::Open(_))
    ));
    assert!(v.handle().is_none());
    assert_eq!(v.start(), Err(MediaError::NoHandle));

    assert_eq!(
        v.enter_loading(&track("b", Some("good.mp3")), Volume::default()),
        LoadOutcome::Attached(HandleId(2))
    );
}

#[test]
fn volume_is_applied_only_to_a_live_handle() {
    let (mut v, probe) = view();
    v.apply_volume(Volume::new(10));
    assert!(probe.calls().is_empty());

    v.enter_loading(&track("a", Some("a.mp3")), Volume::new(10));
    v.apply_volume(Volume::new(45));
    assert_eq!(
        probe.calls().last(),
        Some(&Call::SetVolume(HandleId(1), Volume::new(45)))
    );
}

#[test]
fn unmount_fades_and_drop_is_silent_afterwards() {
    let (mut v, probe) = view();
    v.enter_loading(&track("a", Some("a.mp3")), Volume::default());
    v.unmount(Duration::from_secs(1));
    drop(v);
    assert_eq!(
        probe.calls().last(),
        Some(&Call::Release(HandleId(1), Duration::from_secs(1)))
    );
    assert_eq!(
        probe
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::Release(..)))
            .count(),
        1
    );
}

#[test]
fn transport_intent_targets_the_selected_track() {
    let mut state = PlaybackState::default();
    assert_eq!(transport_intent(&state), None);

    state.selected = Some(TrackId::new("b"));
    state.status = PlayerStatus::Playing;
    assert_eq!(
        transport_intent(&state),
        Some(Intent::TogglePlayPause(TrackId::new("b")))
    );
}

fn bar() -> Rect {
    Rect::new(10, 5, 11, 1)
}

#[test]
fn volume_at_maps_bar_edges_to_range_and_clamps() {
    assert_eq!(volume_at(10, bar()).percent(), 0);
    assert_eq!(volume_at(15, bar()).percent(), 50);
    assert_eq!(volume_at(20, bar()).percent(), 100);
    assert_eq!(volume_at(2, bar()).percent(), 0);
    assert_eq!(volume_at(70, bar()).percent(), 100);
}

#[test]
fn press_outside_the_bar_does_not_capture() {
    let mut drag = VolumeDrag::default();
    assert_eq!(drag.press(9, 5, bar()), None);
    assert_eq!(drag.press(12, 6, bar()), None);
    assert!(!drag.is_dragging());
    assert_eq!(drag.move_to(15), None);
}

#[test]
fn drag_keeps_updating_outside_the_bar_until_release() {
    let mut drag = VolumeDrag::default();
    assert_eq!(drag.press(12, 5, bar()), Some(Volume::new(20)));
    assert!(drag.is_dragging());

    assert_eq!(drag.move_to(18), Some(Volume::new(80)));
    assert_eq!(drag.move_to(200), Some(Volume::new(100)));
    assert_eq!(drag.move_to(0), Some(Volume::new(0)));

    assert!(drag.release());
    assert_eq!(drag.move_to(15), None);
    assert!(!drag.release());
}
