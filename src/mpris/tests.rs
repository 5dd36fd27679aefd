use super::*;
use crate::library::TrackId;
use std::sync::mpsc;
use std::time::Duration;

fn make_track() -> Track {
    Track {
        id: TrackId::new("t7"),
        title: "Test Title".to_string(),
        artist: "Test Artist".to_string(),
        album: "Test Album".to_string(),
        duration_label: "0:01".to_string(),
        audio_source: Some("/tmp/music/test.mp3".to_string()),
        cover_art_source: None,
        duration: Some(Duration::from_micros(1_234_567)),
        display: "Test Artist - Test Title".to_string(),
    }
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();
    let handle = MprisHandle {
        state: state.clone(),
        notify: notify_tx,
    };

    let track = make_track();
    handle.set_track_metadata(Some(7), Some(&track));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert_eq!(s.album.as_deref(), Some("Test Album"));
        assert_eq!(s.url.as_deref(), Some("file:///tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }
    assert!(notify_rx.try_recv().is_ok());

    handle.set_track_metadata(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.album, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn remote_locators_are_published_as_is() {
    assert_eq!(to_url("https://a.example/x.mp3"), "https://a.example/x.mp3");
    assert_eq!(to_url("/m/x.mp3"), "file:///m/x.mp3");
}

#[test]
fn playback_status_maps_player_status_to_mpris_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    for (status, expected) in [
        (PlayerStatus::Idle, "Stopped"),
        (PlayerStatus::Loading, "Stopped"),
        (PlayerStatus::Playing, "Playing"),
        (PlayerStatus::Paused, "Paused"),
        (PlayerStatus::Ended, "Stopped"),
    ] {
        state.lock().unwrap().playback = status;
        assert_eq!(iface.playback_status(), expected, "{status}");
    }
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    assert!(iface.metadata().is_empty());

    {
        let mut s = state.lock().unwrap();
        s.title = Some("Title".to_string());
        s.artist = vec!["Artist".to_string()];
        s.album = Some("Album".to_string());
        s.url = Some("file:///tmp/test.mp3".to_string());
        s.length_micros = Some(42);
        s.track_id = OwnedObjectPath::try_from("/org/mpris/MediaPlayer2/track/1").ok();
    }

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:url",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn player_methods_forward_control_commands() {
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: Arc::new(Mutex::new(SharedState::default())),
    };
    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop
        ]
    );
}
