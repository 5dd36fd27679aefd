//! Application module: the state the TUI and runtime work on.
//!
//! `App` wires the playlist view, the coordinator and the volume drag
//! together and turns terminal and remote-control input into intents.

mod input;
mod model;

pub use model::*;
