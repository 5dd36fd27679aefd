use super::load::{default_config_path, default_state_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_encore_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", "/tmp/encore-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/encore-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn default_state_dir_uses_xdg_state_home_then_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        default_state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-state/encore")
    );

    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/encore")
    );
}

#[test]
fn settings_defaults_match_documented_values() {
    let s = Settings::default();
    assert_eq!(s.audio.initial_volume, 70);
    assert_eq!(s.audio.volume_step, 5);
    assert_eq!(s.audio.release_fade_ms, 0);
    assert!(s.playback.autoplay);
    assert_eq!(s.controls.scrub_seconds, 5);
    assert!(s.library.playlist.is_none());
    assert_eq!(s.logging.filter, "info");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
autoplay = false

[audio]
initial_volume = 40
volume_step = 10
quit_fade_out_ms = 123
release_fade_ms = 80

[controls]
scrub_seconds = 9

[ui]
header_text = "hello"
now_playing_time_fields = ["elapsed", "remaining"]
time_separator = " | "

[library]
playlist = "/srv/music/evening.toml"
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
display_fields = ["filename"]
display_separator = "::"

[logging]
filter = "encore=debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ENCORE__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert!(!s.playback.autoplay);
    assert_eq!(s.audio.initial_volume, 40);
    assert_eq!(s.audio.volume_step, 10);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.audio.release_fade_ms, 80);
    assert_eq!(s.audio.progress_interval_ms, 200);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(
        s.ui.now_playing_time_fields,
        vec![TimeField::Elapsed, TimeField::Remaining]
    );
    assert_eq!(s.ui.time_separator, " | ");
    assert_eq!(
        s.library.playlist.as_deref(),
        Some(std::path::Path::new("/srv/music/evening.toml"))
    );
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.display_separator, "::");
    assert_eq!(s.library.display_fields, vec![TrackDisplayField::Filename]);
    assert_eq!(s.logging.filter, "encore=debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 25
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ENCORE__AUDIO__INITIAL_VOLUME", "90");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 90);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.initial_volume = 101;
    assert!(s.validate().unwrap_err().contains("initial_volume"));

    let mut s = Settings::default();
    s.audio.volume_step = 0;
    assert!(s.validate().unwrap_err().contains("volume_step"));

    let mut s = Settings::default();
    s.audio.progress_interval_ms = 0;
    assert!(s.validate().unwrap_err().contains("progress_interval_ms"));
}
