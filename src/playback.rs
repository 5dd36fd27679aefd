//! Playback coordination.
//!
//! [`Coordinator`] owns the canonical [`PlaybackState`] and is the only code
//! allowed to change it. Views hand it [`Intent`]s; the audio layer hands it
//! media events. Both are applied one at a time.

mod coordinator;
mod intent;
mod state;

pub use coordinator::{Coordinator, CoordinatorOptions};
pub use intent::Intent;
pub use state::{PlaybackState, PlayerStatus};
