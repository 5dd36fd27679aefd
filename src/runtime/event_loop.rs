use std::io::Stdout;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::{App, Flow};
use crate::audio::{MediaBackend, MediaEvent};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playback::PlayerStatus;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// What MPRIS was last told, so it is only updated on change.
pub struct EventLoopState {
    pub last_mpris_index: Option<usize>,
    pub last_mpris_status: PlayerStatus,
}

impl EventLoopState {
    pub fn new<B: MediaBackend>(app: &App<B>) -> Self {
        Self {
            last_mpris_index: app.selected_index(),
            last_mpris_status: app.state().status,
        }
    }
}

/// Channels feeding the loop from outside the terminal.
pub struct Inputs<'a> {
    pub media: &'a Receiver<MediaEvent>,
    pub control: &'a Receiver<ControlCmd>,
}

/// Main terminal event loop: media events, drawing, remote control and
/// terminal input. Returns once a quit is requested; the media handle has
/// been released with the configured fade by then.
pub fn run<B: MediaBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
    inputs: Inputs<'_>,
    mpris: &MprisHandle,
    state: &mut EventLoopState,
) -> Result<()> {
    loop {
        while let Ok(ev) = inputs.media.try_recv() {
            app.handle_media_event(ev);
        }

        sync_mpris(mpris, app, state);

        let mut areas = None;
        terminal.draw(|f| areas = Some(ui::draw(f, app, &settings.ui, &settings.controls)))?;
        if let Some(areas) = areas {
            app.set_hit_areas(areas);
        }

        let mut flow = Flow::Continue;
        while let Ok(cmd) = inputs.control.try_recv() {
            if app.handle_control(cmd) == Flow::Quit {
                flow = Flow::Quit;
                break;
            }
        }

        if flow == Flow::Continue && event::poll(INPUT_POLL)? {
            flow = match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => Flow::Continue,
            };
        }

        if flow == Flow::Quit {
            info!("quit requested");
            app.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));
            sync_mpris(mpris, app, state);
            return Ok(());
        }
    }
}

fn sync_mpris<B: MediaBackend>(mpris: &MprisHandle, app: &App<B>, state: &mut EventLoopState) {
    let index = app.selected_index();
    let status = app.state().status;
    if index != state.last_mpris_index || status != state.last_mpris_status {
        update_mpris(mpris, app);
        state.last_mpris_index = index;
        state.last_mpris_status = status;
    }
}
