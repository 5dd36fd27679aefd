use std::borrow::Cow;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::{display_from_fields, format_clock};
use super::model::{Track, TrackId};

const COVER_ART_NAMES: [&str; 4] = ["cover.jpg", "cover.png", "folder.jpg", "folder.png"];

/// Tag data read from an audio file.
#[derive(Debug, Default)]
pub(super) struct TagProbe {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

pub(super) fn probe_tags(path: &Path) -> TagProbe {
    let tagged = match Probe::open(path).and_then(|p| p.read()) {
        Ok(t) => t,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable tags");
            return TagProbe::default();
        }
    };

    let mut probe = TagProbe {
        duration: Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        ..TagProbe::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        probe.title = clean(tag.title());
        probe.artist = clean(tag.artist());
        probe.album = clean(tag.album());
    }
    probe
}

fn clean(v: Option<Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Look for conventional artwork next to an audio file.
pub(super) fn find_cover_art(dir: &Path) -> Option<String> {
    COVER_ART_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .map(|p| p.to_string_lossy().into_owned())
}

/// Scan `dir` for audio files and build tracks ordered by display string.
///
/// Ids are assigned `"1"`, `"2"`, ... after sorting.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file()
            || (!settings.include_hidden && is_hidden(path))
            || !is_audio_file(path, settings)
        {
            continue;
        }

        let tags = probe_tags(path);
        let title = tags.title.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string()
        });
        let artist = tags.artist.unwrap_or_default();
        let album = tags.album.unwrap_or_default();
        let locator = path.to_string_lossy().into_owned();

        let display = display_from_fields(
            Some(&locator),
            &title,
            &artist,
            &album,
            &settings.display_fields,
            &settings.display_separator,
        );

        tracks.push(Track {
            id: TrackId::new(String::new()),
            title,
            artist,
            album,
            duration_label: tags.duration.map(format_clock).unwrap_or_default(),
            audio_source: Some(locator),
            cover_art_source: path.parent().and_then(find_cover_art),
            duration: tags.duration,
            display,
        });
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    for (i, t) in tracks.iter_mut().enumerate() {
        t.id = TrackId::new((i + 1).to_string());
    }
    debug!(dir = %dir.display(), count = tracks.len(), "scanned library");
    tracks
}
