//! Binary wiring: arguments, settings, logging, the audio thread, MPRIS and
//! the terminal.

use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{MediaEvent, RodioBackend};
use crate::cli::Args;
use crate::library;
use crate::logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let args = Args::parse();
    let (mut settings, problem) = settings::load_settings(args.config.as_deref());
    args.apply(&mut settings);

    let _log_guard = logging::init(&settings.logging)?;
    if let Some(problem) = problem {
        warn!("{problem}");
    }

    let source = startup::resolve_source(args.source.clone(), &settings);
    let playlist = library::load(&source, &settings.library)
        .with_context(|| format!("loading playlist from {}", source.display()))?;
    info!(
        name = playlist.name(),
        tracks = playlist.len(),
        "playlist loaded"
    );

    let (media_tx, media_rx) = mpsc::channel::<MediaEvent>();
    let backend = RodioBackend::spawn(&settings.audio, media_tx);
    let mut app = App::new(playlist, backend, startup::app_options(&settings));

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &app);

    app.mount();

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("creating terminal")?;

    let mut state = event_loop::EventLoopState::new(&app);
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        event_loop::Inputs {
            media: &media_rx,
            control: &control_rx,
        },
        &mpris,
        &mut state,
    );

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Dropping the app joins the audio thread once the release fade is done.
    drop(app);
    run_result
}
