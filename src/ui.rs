//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.
//! [`draw`] returns the screen regions the mouse handlers need for the
//! next frame.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, path::Path, sync::LazyLock, time::Duration};

use crate::app::{App, HitAreas, RowHit};
use crate::audio::MediaBackend;
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::library::{Track, format_clock};
use crate::playback::{PlaybackState, PlayerStatus};
use crate::playlist::RowMarker;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected song");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("+/-", "volume");
    map.insert("K", "details");
    map.insert("q", "quit");
    map
});

const TRANSPORT_WIDTH: u16 = 5;
const COVER_GLYPH: &str = "♪";

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["j/k", "h/l", "H/L", "enter", "space/p", "+/-", "gg/G", "K", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Build the time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_clock(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_clock(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    let rem = t.saturating_sub(elapsed);
                    parts.push(format!("-{}", format_clock(rem)));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.time_separator))
    }
}

/// Label for the playlist footer.
fn stat_label(state: &PlaybackState) -> &'static str {
    if state.error.is_some() {
        return "ERROR";
    }
    match state.status {
        PlayerStatus::Idle => "AUDIO READY",
        PlayerStatus::Loading => "LOADING",
        PlayerStatus::Playing => "PLAYING",
        PlayerStatus::Paused => "PAUSED",
        PlayerStatus::Ended => "ENDED",
    }
}

/// A `width`-cell bar filled to `ratio`.
fn bar_line(ratio: f64, width: u16, fill: &str, rest: &str, color: Color) -> Line<'static> {
    let width = usize::from(width);
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    Line::from(vec![
        Span::styled(fill.repeat(filled), Style::default().fg(color)),
        Span::styled(rest.repeat(width - filled), Style::default().fg(Color::DarkGray)),
    ])
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Three transport buttons centered in `area`, one cell apart.
fn transport_rects(area: Rect) -> [Rect; 3] {
    let total = TRANSPORT_WIDTH * 3 + 2;
    if area.width < total {
        return [Rect::default(); 3];
    }
    let x0 = area.x + (area.width - total) / 2;
    [0u16, 1, 2].map(|i| Rect::new(x0 + i * (TRANSPORT_WIDTH + 1), area.y, TRANSPORT_WIDTH, 1))
}

/// Visible row window centered on `cursor` when the list does not fit.
fn visible_window(total: usize, height: usize, cursor: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = cursor.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn cover_label(track: Option<&Track>) -> String {
    track
        .and_then(|t| t.cover_art_source.as_deref())
        .and_then(|s| Path::new(s).file_name())
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| COVER_GLYPH.to_string())
}

fn draw_player<B: MediaBackend>(
    frame: &mut Frame,
    app: &App<B>,
    area: Rect,
    ui_settings: &UiSettings,
    areas: &mut HitAreas,
) {
    let block = Block::bordered().title(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let state = app.state();
    let track = app.selected_track();

    let cover = Paragraph::new(cover_label(track))
        .alignment(Alignment::Center)
        .block(Block::bordered().padding(Padding::top(1)));
    frame.render_widget(cover, centered_rect_sized(24, 5, rows[0]).intersection(rows[0]));

    let (title, byline) = match track {
        Some(t) => {
            let by = [t.artist.as_str(), t.album.as_str()]
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" · ");
            (t.title.clone(), by)
        }
        None => ("Nothing selected".to_string(), String::new()),
    };
    frame.render_widget(
        Paragraph::new(title).bold().alignment(Alignment::Center),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(byline)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        rows[2],
    );

    // Progress
    let progress_bar = Rect {
        x: rows[4].x + 1,
        width: rows[4].width.saturating_sub(2),
        ..rows[4]
    };
    frame.render_widget(
        Paragraph::new(bar_line(
            state.progress_ratio(),
            progress_bar.width,
            "━",
            "─",
            Color::Green,
        )),
        progress_bar,
    );
    areas.progress_bar = progress_bar;

    if let Some(time) = now_playing_time_text(state.progress, state.duration, ui_settings) {
        frame.render_widget(Paragraph::new(time).alignment(Alignment::Center), rows[5]);
    }

    // Transport
    let toggle = if state.is_playing() { " ⏸ " } else { " ▶ " };
    let buttons = transport_rects(rows[6]);
    for (rect, label) in buttons.iter().zip([" ⏮ ", toggle, " ⏭ "]) {
        if rect.width > 0 {
            frame.render_widget(
                Paragraph::new(format!("[{label}]"))
                    .alignment(Alignment::Center)
                    .bold(),
                *rect,
            );
        }
    }
    areas.transport = buttons;

    // Volume: "vol " + bar + " 100"
    let vol_row = rows[7];
    let label_w = 4u16;
    let value_w = 4u16;
    let volume_bar = Rect {
        x: vol_row.x + 1 + label_w,
        width: vol_row.width.saturating_sub(2 + label_w + value_w),
        ..vol_row
    };
    frame.render_widget(
        Paragraph::new("vol"),
        Rect {
            x: vol_row.x + 1,
            width: label_w,
            ..vol_row
        }
        .intersection(vol_row),
    );
    frame.render_widget(
        Paragraph::new(bar_line(
            f64::from(state.volume.percent()) / 100.0,
            volume_bar.width,
            "█",
            "░",
            if app.volume_drag.is_dragging() {
                Color::Yellow
            } else {
                Color::Cyan
            },
        )),
        volume_bar,
    );
    frame.render_widget(
        Paragraph::new(format!("{:>4}", state.volume.percent())),
        Rect {
            x: volume_bar.x + volume_bar.width,
            width: value_w,
            ..vol_row
        }
        .intersection(vol_row),
    );
    areas.volume_bar = volume_bar;

    // Status / error
    let status = match &state.error {
        Some(e) => Paragraph::new(format!("can't play this track: {e}"))
            .style(Style::default().fg(Color::Red)),
        None => Paragraph::new(state.status.to_string()).style(Style::default().fg(Color::Gray)),
    };
    frame.render_widget(status.alignment(Alignment::Center), rows[9]);
}

fn draw_playlist<B: MediaBackend>(frame: &mut Frame, app: &App<B>, area: Rect, areas: &mut HitAreas) {
    let playlist = app.playlist();
    let block = Block::bordered()
        .title(format!(" {} ", playlist.name()))
        .title_bottom(Line::from(format!(" {} tracks ", playlist.len())).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let list_area = parts[0];

    let rows = app.playlist_view.rows(app.state());
    let cursor = app.playlist_view.cursor();
    // Only build lines for the visible window.
    let (start, end) = visible_window(rows.len(), usize::from(list_area.height), cursor);

    let mut lines: Vec<Line> = Vec::with_capacity(end - start);
    areas.rows.clear();
    for (offset, row) in rows[start..end].iter().enumerate() {
        let index = start + offset;
        let mut style = Style::default();
        if row.is_active() {
            style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
        }
        if index == cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let marker = match row.marker {
            RowMarker::None => row.index_label.clone(),
            m => format!("{:>2}", m.glyph()),
        };
        let mut text = format!("{marker}  {}", row.title);
        if !row.artist.is_empty() {
            text.push_str(&format!(" · {}", row.artist));
        }
        lines.push(Line::from(vec![
            Span::styled(text, style),
            Span::styled(format!("  {}", row.duration_label), Style::default().fg(Color::Gray)),
        ]));

        areas.rows.push(RowHit {
            area: Rect::new(list_area.x, list_area.y + offset as u16, list_area.width, 1),
            index,
        });
    }
    frame.render_widget(Paragraph::new(lines), list_area);

    let stat_color = if app.state().error.is_some() {
        Color::Red
    } else {
        Color::Cyan
    };
    frame.render_widget(
        Paragraph::new(stat_label(app.state()))
            .style(Style::default().fg(stat_color))
            .alignment(Alignment::Right),
        parts[1],
    );
}

fn draw_details<B: MediaBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let popup_area = centered_rect_sized(72, 11, area);
    frame.render_widget(Clear, popup_area);

    let or_dash = |s: &str| {
        if s.trim().is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };
    let meta = match app.playlist_view.cursor_track() {
        Some(track) => format!(
            "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nProbed: {}\nAudio: {}\nCover art: {}",
            track.title,
            or_dash(&track.artist),
            or_dash(&track.album),
            or_dash(&track.duration_label),
            track.duration.map(format_clock).unwrap_or_else(|| "-".to_string()),
            track.audio_source.as_deref().unwrap_or("-"),
            track.cover_art_source.as_deref().unwrap_or("-"),
        ),
        None => "No track under the cursor".to_string(),
    };
    let paragraph = Paragraph::new(meta)
        .block(
            Block::default()
                .padding(Padding::left(1))
                .borders(Borders::ALL)
                .title(" details (K closes) "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Render the entire UI into `frame` and return the clickable regions.
pub fn draw<B: MediaBackend>(
    frame: &mut Frame,
    app: &App<B>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> HitAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let mut areas = HitAreas::default();
    draw_player(frame, app, body[0], ui_settings, &mut areas);
    draw_playlist(frame, app, body[1], &mut areas);

    // Overlay details popup (keeps the panels visible under it)
    if app.details_window {
        draw_details(frame, app, chunks[1]);
    }

    let footer_text = controls_text(controls_settings.scrub_seconds);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    areas
}
