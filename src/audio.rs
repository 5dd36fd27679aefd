//! Media output.
//!
//! [`MediaBackend`] is the seam between playback logic and the sound
//! device. [`RodioBackend`] implements it on a dedicated audio thread that
//! owns the `rodio` output stream; results come back as [`MediaEvent`]s.

mod backend;
mod clock;
mod sink;
mod thread;
mod types;

#[cfg(test)]
pub mod testing;

pub use backend::RodioBackend;
pub use types::{HandleId, MediaBackend, MediaError, MediaEvent, MediaEventKind, Volume};
