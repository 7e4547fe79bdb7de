use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
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
fn resolve_config_path_prefers_explicit_env_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("PIJUKEBOX_CONFIG_PATH", "/tmp/pijukebox-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/pijukebox-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("pijukebox")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("pijukebox")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_legacy_layout() {
    let s = Settings::default();
    assert_eq!(s.server.port, 5000);
    assert_eq!(s.server.host, "0.0.0.0");
    assert_eq!(s.library.music_folder, PathBuf::from("mock_music"));
    assert_eq!(s.library.playlist_file, "playlist.txt");
    assert!(s.library.seeds_mock_tracks());
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "wav".to_string()]);
    assert_eq!(s.backend.mode, BackendMode::Auto);
    assert!(s.gpio.status_led_pin.is_none());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_backend_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
host = "127.0.0.1"
port = 8080
static_dir = "/srv/jukebox/static"

[library]
music_folder = "/srv/music"
extensions = ["mp3", "flac"]
playlist_file = "order.txt"
seed_mock_tracks = false

[backend]
mode = "mock"

[audio]
crossfade_ms = 300
crossfade_steps = 6
stop_fade_out_ms = 120

[gpio]
status_led_pin = 17
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PIJUKEBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PIJUKEBOX__SERVER__PORT");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.host, "127.0.0.1");
    assert_eq!(s.server.port, 8080);
    assert_eq!(
        s.server.static_dir.as_deref(),
        Some(std::path::Path::new("/srv/jukebox/static"))
    );
    assert_eq!(s.library.music_folder, PathBuf::from("/srv/music"));
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "flac".to_string()]);
    assert_eq!(s.library.playlist_file, "order.txt");
    assert_eq!(s.library.seed_mock_tracks, Some(false));
    assert!(!s.library.seeds_mock_tracks());
    assert_eq!(s.backend.mode, BackendMode::Simulated);
    assert_eq!(s.audio.crossfade_ms, 300);
    assert_eq!(s.audio.crossfade_steps, 6);
    assert_eq!(s.audio.stop_fade_out_ms, 120);
    assert_eq!(s.gpio.status_led_pin, Some(17));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
port = 8080
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PIJUKEBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("PIJUKEBOX__SERVER__PORT", "9090");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.port, 9090);
}

#[test]
fn load_from_required_path_fails_when_file_is_missing() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(Settings::load_from(Some(missing.clone()), true).is_err());
    assert!(Settings::load_from(Some(missing), false).is_ok());
}

#[test]
fn validate_rejects_unusable_values() {
    let mut s = Settings::default();
    s.library.extensions = vec![" . ".into(), "".into()];
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.playlist_file = "../playlist.txt".into();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.crossfade_steps = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.server.port = 0;
    assert!(s.validate().is_err());
}
