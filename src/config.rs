//! Settings: a TOML file layered under `ENCORE__*` environment overrides.
//!
//! Every section has defaults, so a missing file is not an error.

mod load;
mod schema;

pub use load::default_state_dir;
pub use schema::*;

#[cfg(test)]
mod tests;
