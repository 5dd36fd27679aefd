//! Keyboard, mouse and remote-control handling for `App`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::audio::MediaBackend;
use crate::mpris::ControlCmd;
use crate::player::transport_intent;

use super::model::{App, Flow, Transport};

fn hit(area: Rect, column: u16, row: u16) -> bool {
    area.width > 0 && area.contains(Position::new(column, row))
}

impl<B: MediaBackend> App<B> {
    /// Transport toggle; with nothing selected yet it starts the first track.
    pub fn toggle_transport(&mut self) {
        let intent = transport_intent(self.coordinator.state())
            .or_else(|| self.playlist_view.bootstrap(self.coordinator.state()));
        self.dispatch(intent);
    }

    /// Select the neighbouring track and move the cursor along.
    pub fn step_track(&mut self, step: isize) {
        let intent = self
            .playlist_view
            .step_intent(self.coordinator.state(), step);
        self.dispatch(intent);
        if let Some(i) = self.selected_index() {
            self.playlist_view.set_cursor(i);
        }
    }

    pub fn press_transport(&mut self, button: Transport) {
        match button {
            Transport::Prev => self.step_track(-1),
            Transport::Toggle => self.toggle_transport(),
            Transport::Next => self.step_track(1),
        }
    }

    /// Play the track under the cursor.
    pub fn play_cursor(&mut self) {
        let Some(id) = self.playlist_view.cursor_track().map(|t| t.id.clone()) else {
            return;
        };
        let intent = self
            .playlist_view
            .select_and_play(&id, self.coordinator.state());
        self.dispatch(intent);
    }

    /// Row click: flip the row's track, or switch to it.
    pub fn click_row(&mut self, index: usize) {
        let Some(id) = self.playlist().at(index).map(|t| t.id.clone()) else {
            return;
        };
        self.playlist_view.set_cursor(index);
        let intent = self
            .playlist_view
            .toggle_play_pause(&id, self.coordinator.state());
        self.dispatch(intent);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.pending_gg = false;
                return Flow::Quit;
            }
            KeyCode::Char('g') => {
                if self.pending_gg {
                    self.pending_gg = false;
                    self.playlist_view.top();
                } else {
                    self.pending_gg = true;
                }
            }
            KeyCode::Char('G') => {
                self.pending_gg = false;
                self.playlist_view.bottom();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.pending_gg = false;
                self.playlist_view.move_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.pending_gg = false;
                self.playlist_view.move_up();
            }
            KeyCode::Enter => {
                self.pending_gg = false;
                self.play_cursor();
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.pending_gg = false;
                self.toggle_transport();
            }
            KeyCode::Char('l') => {
                self.pending_gg = false;
                self.step_track(1);
            }
            KeyCode::Char('h') => {
                self.pending_gg = false;
                self.step_track(-1);
            }
            KeyCode::Char('L') => {
                self.pending_gg = false;
                let secs = self.scrub_seconds.min(i64::MAX as u64) as i64;
                self.coordinator.seek_by(secs);
            }
            KeyCode::Char('H') => {
                self.pending_gg = false;
                let secs = self.scrub_seconds.min(i64::MAX as u64) as i64;
                self.coordinator.seek_by(-secs);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.pending_gg = false;
                self.coordinator.adjust_volume(i32::from(self.volume_step));
            }
            KeyCode::Char('-') => {
                self.pending_gg = false;
                self.coordinator.adjust_volume(-i32::from(self.volume_step));
            }
            KeyCode::Char('K') => {
                self.pending_gg = false;
                self.toggle_details_window();
            }
            KeyCode::Esc => {
                self.pending_gg = false;
                self.details_window = false;
            }
            KeyCode::Char(_) => {
                // g pending should clear on any other printable char
                self.pending_gg = false;
            }
            _ => {}
        }

        Flow::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Flow {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(volume) = self.volume_drag.press(column, row, self.areas.volume_bar) {
                    self.coordinator.set_volume(volume);
                    return Flow::Continue;
                }

                let bar = self.areas.progress_bar;
                if hit(bar, column, row) {
                    let span = f64::from(bar.width.saturating_sub(1).max(1));
                    let fraction = f64::from(column - bar.x) / span;
                    self.coordinator.seek_to_fraction(fraction);
                    return Flow::Continue;
                }

                if let Some(button) = Transport::ALL
                    .into_iter()
                    .zip(self.areas.transport)
                    .find(|(_, area)| hit(*area, column, row))
                    .map(|(b, _)| b)
                {
                    self.press_transport(button);
                    return Flow::Continue;
                }

                if let Some(index) = self
                    .areas
                    .rows
                    .iter()
                    .find(|r| hit(r.area, column, row))
                    .map(|r| r.index)
                {
                    self.click_row(index);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(volume) = self.volume_drag.move_to(column) {
                    self.coordinator.set_volume(volume);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.volume_drag.release();
            }
            MouseEventKind::ScrollDown => self.playlist_view.move_down(),
            MouseEventKind::ScrollUp => self.playlist_view.move_up(),
            _ => {}
        }
        Flow::Continue
    }

    pub fn handle_control(&mut self, cmd: ControlCmd) -> Flow {
        let playing = self.state().is_playing();
        match cmd {
            ControlCmd::Quit => return Flow::Quit,
            ControlCmd::PlayPause => self.toggle_transport(),
            ControlCmd::Play => {
                if !playing {
                    self.toggle_transport();
                }
            }
            ControlCmd::Pause | ControlCmd::Stop => {
                if playing {
                    self.toggle_transport();
                }
            }
            ControlCmd::Next => self.step_track(1),
            ControlCmd::Prev => self.step_track(-1),
        }
        Flow::Continue
    }
}
