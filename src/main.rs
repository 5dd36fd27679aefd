mod app;
mod audio;
mod cli;
mod config;
mod library;
mod logging;
mod mpris;
mod playback;
mod player;
mod playlist;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
