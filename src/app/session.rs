use serde::Serialize;

use crate::backend::{Backend, BackendKind};
use crate::config::GpioSettings;
use crate::gpio::{Gpio, Level, PinNumbering};
use crate::library::{PlaylistError, PlaylistStore};

use super::model::{Playback, PlaybackState};

/// Snapshot of the player, as reported by `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub state: PlaybackState,
    pub current_track: Option<String>,
    pub index: Option<usize>,
    pub backend: BackendKind,
}

/// Everything one running player owns: the playlist, the playback state
/// machine and the GPIO lines.
///
/// Built once by the runtime and shared with the HTTP handlers behind a
/// mutex, so every operation below runs alone.
pub struct App {
    store: PlaylistStore,
    playback: Playback,
    gpio: Box<dyn Gpio>,
    backend: BackendKind,
    status_led: Option<u8>,
}

impl App {
    pub fn new(store: PlaylistStore, backend: Backend, gpio_settings: &GpioSettings) -> Self {
        let Backend { kind, engine, gpio } = backend;
        let mut app = Self {
            store,
            playback: Playback::new(engine),
            gpio,
            backend: kind,
            status_led: None,
        };
        app.setup_gpio(gpio_settings);
        app
    }

    fn setup_gpio(&mut self, settings: &GpioSettings) {
        if let Err(e) = self.gpio.set_mode(PinNumbering::Bcm) {
            tracing::warn!(gpio = self.gpio.name(), error = %e, "failed to set GPIO mode");
        }
        if let Some(pin) = settings.status_led_pin {
            match self.gpio.setup_output(pin) {
                Ok(()) => self.status_led = Some(pin),
                Err(e) => tracing::warn!(pin, error = %e, "status LED unavailable"),
            }
        }
    }

    pub fn playlist(&mut self) -> Result<Vec<String>, PlaylistError> {
        Ok(self.store.files()?.to_vec())
    }

    pub fn available_tracks(&mut self) -> Result<Vec<String>, PlaylistError> {
        self.store.available_tracks()
    }

    pub fn reload_playlist(&mut self) -> Result<Vec<String>, PlaylistError> {
        Ok(self.store.reload()?.to_vec())
    }

    pub fn reorder_playlist(&mut self, new_order: Vec<String>) -> Result<Vec<String>, PlaylistError> {
        Ok(self.store.save_order(new_order)?.to_vec())
    }

    pub fn add_track(&mut self, filename: &str) -> Result<bool, PlaylistError> {
        self.store.add(filename)
    }

    pub fn remove_track(&mut self, filename: &str) -> Result<bool, PlaylistError> {
        self.store.remove(filename)
    }

    pub fn play_pause(&mut self, filename: Option<&str>) -> Result<PlaybackState, PlaylistError> {
        let folder = self.store.file().folder().to_path_buf();
        let playlist = self.store.files()?;
        let state = self.playback.play_pause(&folder, playlist, filename);
        self.sync_status_led();
        Ok(state)
    }

    pub fn stop(&mut self) -> PlaybackState {
        let state = self.playback.stop();
        self.sync_status_led();
        state
    }

    pub fn status(&self) -> Status {
        Status {
            state: self.playback.state(),
            current_track: self.playback.current_track().map(str::to_string),
            index: self.current_index(),
            backend: self.backend,
        }
    }

    /// Stop playback and release the audio output and GPIO lines.
    pub fn shutdown(&mut self) {
        self.playback.shutdown();
        self.sync_status_led();
        self.gpio.cleanup();
        tracing::info!(backend = ?self.backend, "player shut down");
    }

    /// Position of the current track in the playlist as it is now, which may
    /// differ from where it was started after a reorder or removal.
    fn current_index(&self) -> Option<usize> {
        let name = self.playback.current_track()?;
        let order = self.store.cached()?;
        match self.playback.current_index() {
            Some(i) if order.get(i).is_some_and(|f| f == name) => Some(i),
            _ => order.iter().position(|f| f == name),
        }
    }

    fn sync_status_led(&mut self) {
        let Some(pin) = self.status_led else {
            return;
        };
        let level = match self.playback.state() {
            PlaybackState::Playing => Level::High,
            PlaybackState::Paused | PlaybackState::Stopped => Level::Low,
        };
        if let Err(e) = self.gpio.write(pin, level) {
            tracing::warn!(pin, error = %e, "failed to drive status LED");
        }
    }
}
