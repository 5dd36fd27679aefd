use super::*;
use crate::config::{LibrarySettings, TrackDisplayField};
use std::path::Path;
use std::time::Duration;

fn track(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: format!("Song {id}"),
        artist: String::new(),
        album: String::new(),
        duration_label: String::new(),
        audio_source: Some(format!("/tmp/{id}.mp3")),
        cover_art_source: None,
        duration: None,
        display: format!("Song {id}"),
    }
}

#[test]
fn display_from_fields_can_format_artist_title() {
    let fields = [TrackDisplayField::Artist, TrackDisplayField::Title];
    assert_eq!(
        display_from_fields(Some("/tmp/Song.mp3"), "Song", "Artist", "", &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(Some("/tmp/Song.mp3"), "Song", "  Artist  ", "", &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(None, "Song", "", "", &fields, " - "),
        "Song"
    );
}

#[test]
fn display_from_fields_uses_locator_for_filename() {
    assert_eq!(
        display_from_fields(
            Some("/music/Obskur Bayside.mp3"),
            "Title",
            "",
            "",
            &[TrackDisplayField::Filename],
            "::",
        ),
        "Obskur Bayside"
    );
    // No locator and nothing else produced: fall back to the title.
    assert_eq!(
        display_from_fields(None, "Title", "", "", &[TrackDisplayField::Filename], "::"),
        "Title"
    );
}

#[test]
fn format_clock_is_minutes_and_padded_seconds() {
    assert_eq!(format_clock(Duration::ZERO), "0:00");
    assert_eq!(format_clock(Duration::from_secs(210)), "3:30");
    assert_eq!(format_clock(Duration::from_millis(65_900)), "1:05");
}

#[test]
fn playlist_rejects_duplicate_and_empty_ids() {
    let err = Playlist::new("p", vec![track("a"), track("b"), track("a")]).unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateId(ref id) if id == "a"));

    let err = Playlist::new("p", vec![track("a"), track(" ")]).unwrap_err();
    assert!(matches!(err, LibraryError::EmptyId { index: 1 }));
}

#[test]
fn playlist_neighbour_wraps_in_both_directions() {
    let p = Playlist::new("p", vec![track("a"), track("b"), track("c")]).unwrap();
    let a = TrackId::new("a");
    let c = TrackId::new("c");

    assert_eq!(p.neighbour(Some(&a), 1).unwrap().id.as_str(), "b");
    assert_eq!(p.neighbour(Some(&a), -1).unwrap().id.as_str(), "c");
    assert_eq!(p.neighbour(Some(&c), 1).unwrap().id.as_str(), "a");
    assert_eq!(p.neighbour(None, 1).unwrap().id.as_str(), "a");

    let empty = Playlist::new("p", Vec::new()).unwrap();
    assert!(empty.neighbour(None, 1).is_none());
}

#[test]
fn parse_playlist_resolves_relative_locators_and_keeps_placeholders() {
    let text = r#"
name = "KevOS"

[[tracks]]
id = "1"
title = "Get Wid Lemonade"
artist = "Artist Name"
album = "KevOS Collection"
duration = "3:30"
audio = "music/lemonade.mp3"

[[tracks]]
id = "2"
title = "Remote"
audio = "https://example.com/remote.mp3"
cover_art = "/abs/art.png"

[[tracks]]
id = "3"
title = "Placeholder"
audio = "   "
"#;
    let settings = LibrarySettings {
        display_fields: vec![TrackDisplayField::Title],
        ..LibrarySettings::default()
    };
    let playlist = parse_playlist(text, Path::new("/srv/site"), &settings).unwrap();

    assert_eq!(playlist.name(), "KevOS");
    assert_eq!(playlist.len(), 3);

    let first = &playlist.tracks()[0];
    assert_eq!(first.duration_label, "3:30");
    assert_eq!(
        first.audio_source.as_deref(),
        Some(Path::new("/srv/site").join("music/lemonade.mp3").to_str().unwrap())
    );

    let second = &playlist.tracks()[1];
    assert_eq!(second.audio_source.as_deref(), Some("https://example.com/remote.mp3"));
    assert_eq!(second.cover_art_source.as_deref(), Some("/abs/art.png"));
    assert_eq!(second.artist, "");

    let third = &playlist.tracks()[2];
    assert!(third.audio_source.is_none());
    assert!(!third.has_audio());
}

#[test]
fn parse_playlist_reports_duplicate_ids() {
    let text = r#"
[[tracks]]
id = "x"
title = "One"

[[tracks]]
id = "x"
title = "Two"
"#;
    let err = parse_playlist(text, Path::new("."), &LibrarySettings::default()).unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateId(_)));
}

#[test]
fn load_reads_playlist_file_or_scans_directory() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("list.toml");
    std::fs::write(
        &list,
        "[[tracks]]\nid = \"a\"\ntitle = \"A\"\naudio = \"a.mp3\"\n",
    )
    .unwrap();

    let from_file = load(&list, &LibrarySettings::default()).unwrap();
    assert_eq!(from_file.len(), 1);
    assert_eq!(from_file.name(), "playlist");

    let err = load(&dir.path().join("missing.toml"), &LibrarySettings::default()).unwrap_err();
    assert!(matches!(err, LibraryError::Io { .. }));

    std::fs::write(dir.path().join("song.mp3"), b"not real").unwrap();
    let scanned = load(dir.path(), &LibrarySettings::default()).unwrap();
    assert_eq!(scanned.len(), 1);
}
