use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/pijukebox/config.toml` or `~/.config/pijukebox/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line overrides (`--music-folder`, `--port`)
/// 2) Environment variables (prefix `PIJUKEBOX__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub library: LibrarySettings,
    pub backend: BackendSettings,
    pub audio: AudioSettings,
    pub gpio: GpioSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the HTTP server binds to.
    pub host: String,
    pub port: u16,
    /// Directory with the browser UI. Served for every path outside `/api`.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folder holding the audio files and the playlist order file.
    pub music_folder: PathBuf,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Name of the order file inside `music_folder`.
    pub playlist_file: String,
    /// When the music folder has to be created, drop two empty placeholder
    /// tracks into it. Unset means: only for the default `mock_music` folder.
    pub seed_mock_tracks: Option<bool>,
}

impl LibrarySettings {
    pub const DEFAULT_MUSIC_FOLDER: &'static str = "mock_music";

    /// Whether a freshly created music folder gets placeholder tracks.
    pub fn seeds_mock_tracks(&self) -> bool {
        self.seed_mock_tracks
            .unwrap_or_else(|| self.music_folder == Path::new(Self::DEFAULT_MUSIC_FOLDER))
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_folder: PathBuf::from(Self::DEFAULT_MUSIC_FOLDER),
            extensions: vec!["mp3".into(), "wav".into()],
            playlist_file: "playlist.txt".to_string(),
            seed_mock_tracks: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub mode: BackendMode,
}

/// Which playback/GPIO implementation to run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendMode {
    /// Use the hardware backend when GPIO can be opened, otherwise simulate.
    #[default]
    Auto,
    #[serde(alias = "hw", alias = "rpi", alias = "real")]
    Hardware,
    #[serde(alias = "sim", alias = "mock")]
    Simulated,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Crossfade duration when switching tracks (milliseconds).
    /// Set to 0 to disable crossfade.
    pub crossfade_ms: u64,
    /// Number of steps used to fade volumes (higher = smoother, more CPU).
    pub crossfade_steps: u64,
    /// Fade-out duration when stopping or shutting down (milliseconds).
    /// Set to 0 to stop immediately.
    pub stop_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            crossfade_ms: 0,
            crossfade_steps: 10,
            stop_fade_out_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GpioSettings {
    /// BCM pin driven high while a track is playing.
    pub status_led_pin: Option<u8>,
}
