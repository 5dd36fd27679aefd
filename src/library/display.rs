use std::path::Path;
use std::time::Duration;

use crate::config::TrackDisplayField;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// Filename and path parts come from the track's audio locator. When no part
/// is produced the title is used as-is.
pub fn display_from_fields(
    locator: Option<&str>,
    title: &str,
    artist: &str,
    album: &str,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    let non_empty = |s: &str| -> Option<String> {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    for f in fields {
        match f {
            TrackDisplayField::Display => {
                parts.extend(non_empty(artist));
                parts.extend(non_empty(title));
            }
            TrackDisplayField::Title => parts.extend(non_empty(title)),
            TrackDisplayField::Artist => parts.extend(non_empty(artist)),
            TrackDisplayField::Album => parts.extend(non_empty(album)),
            TrackDisplayField::Filename => {
                if let Some(stem) = locator
                    .map(Path::new)
                    .and_then(|p| p.file_stem())
                    .and_then(|s| s.to_str())
                {
                    parts.extend(non_empty(stem));
                }
            }
            TrackDisplayField::Path => {
                if let Some(l) = locator {
                    parts.extend(non_empty(l));
                }
            }
        }
    }

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}

/// Format a duration as `m:ss`, truncating partial seconds.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
