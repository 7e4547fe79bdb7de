use std::path::{Path, PathBuf};

use super::types::EngineError;

/// Low-level playback primitives the playback state machine drives.
///
/// Implementations are expected to be synchronous: a call returns once the
/// engine has acted on it.
pub trait AudioEngine: Send {
    /// Short name used in logs and the status endpoint.
    fn name(&self) -> &'static str;

    /// Whether the engine initialized and can make sound.
    fn is_ready(&self) -> bool;

    /// Load `path` and start playing it from the beginning.
    fn play(&mut self, path: &Path) -> Result<(), EngineError>;

    fn pause(&mut self) -> Result<(), EngineError>;

    fn resume(&mut self) -> Result<(), EngineError>;

    fn stop(&mut self) -> Result<(), EngineError>;

    /// Release the output device. The engine is not used afterwards.
    fn shutdown(&mut self) {}
}

/// Engine that only logs what it would do.
///
/// Used on machines without audio hardware. It never touches the files it is
/// asked to play.
#[derive(Debug, Default)]
pub struct SimulatedEngine {
    loaded: Option<PathBuf>,
    paused: bool,
}

impl SimulatedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn loaded(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl AudioEngine for SimulatedEngine {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn play(&mut self, path: &Path) -> Result<(), EngineError> {
        tracing::info!(path = %path.display(), "simulated engine: playing");
        self.loaded = Some(path.to_path_buf());
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        tracing::info!(path = ?self.loaded, "simulated engine: paused");
        self.paused = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        tracing::info!(path = ?self.loaded, "simulated engine: resumed");
        self.paused = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        tracing::info!("simulated engine: stopped");
        self.loaded = None;
        self.paused = false;
        Ok(())
    }
}
