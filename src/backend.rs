//! Picks the hardware or simulated backend once at startup.

use serde::Serialize;

use crate::audio::{AudioEngine, AudioPlayer, SimulatedEngine};
use crate::config::{BackendMode, Settings};
use crate::gpio::{self, Gpio, GpioError, SimulatedGpio};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Hardware,
    Simulated,
}

/// The playback engine and GPIO controller a player runs on.
pub struct Backend {
    pub kind: BackendKind,
    pub engine: Box<dyn AudioEngine>,
    pub gpio: Box<dyn Gpio>,
}

impl Backend {
    pub fn simulated() -> Self {
        Self {
            kind: BackendKind::Simulated,
            engine: Box::new(SimulatedEngine::new()),
            gpio: Box::new(SimulatedGpio::new()),
        }
    }
}

/// Select the backend for this process according to `settings.backend.mode`.
pub fn select(settings: &Settings) -> Backend {
    let audio = settings.audio.clone();
    select_with(settings.backend.mode, gpio::open_hardware, move || {
        Box::new(AudioPlayer::new(audio))
    })
}

/// Backend selection with the hardware probes injected.
///
/// - `Simulated`: never probes.
/// - `Auto`: the hardware backend when GPIO opens, otherwise simulated.
/// - `Hardware`: real audio output regardless; GPIO falls back to the
///   simulated controller when it cannot be opened.
pub fn select_with<G, E>(mode: BackendMode, open_gpio: G, open_engine: E) -> Backend
where
    G: FnOnce() -> Result<Box<dyn Gpio>, GpioError>,
    E: FnOnce() -> Box<dyn AudioEngine>,
{
    let backend = match mode {
        BackendMode::Simulated => Backend::simulated(),
        BackendMode::Auto => match open_gpio() {
            Ok(gpio) => Backend {
                kind: BackendKind::Hardware,
                engine: open_engine(),
                gpio,
            },
            Err(e) => {
                tracing::info!(reason = %e, "hardware not available, falling back to simulation");
                Backend::simulated()
            }
        },
        BackendMode::Hardware => {
            let gpio = open_gpio().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "hardware backend forced without GPIO, simulating pins");
                Box::new(SimulatedGpio::new())
            });
            Backend {
                kind: BackendKind::Hardware,
                engine: open_engine(),
                gpio,
            }
        }
    };

    tracing::info!(
        kind = ?backend.kind,
        engine = backend.engine.name(),
        gpio = backend.gpio.name(),
        "backend selected"
    );
    backend
}
