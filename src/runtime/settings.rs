use std::path::Path;

use crate::config;

/// Load settings, falling back to defaults when the file is unreadable or
/// invalid. The second value describes the problem; it is logged once the
/// subscriber is installed.
pub fn load_settings(path: Option<&Path>) -> (config::Settings, Option<String>) {
    let loaded = match path {
        Some(p) => config::Settings::load_from(Some(p)),
        None => config::Settings::load(),
    };
    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
