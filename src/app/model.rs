//! Playback state machine.
//!
//! `Playback` owns the audio engine and tracks whether it is stopped, playing
//! or paused, which track is current and where that track sits in the
//! playlist.

use std::path::Path;

use serde::Serialize;

use crate::audio::{AudioEngine, EngineError};
use crate::library::is_plain_file_name;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

pub struct Playback {
    engine: Box<dyn AudioEngine>,
    state: PlaybackState,
    current: Option<String>,
    // Playlist index of the last started track. Survives `stop` so a bare
    // play/pause can restart it.
    index: Option<usize>,
}

impl Playback {
    pub fn new(engine: Box<dyn AudioEngine>) -> Self {
        Self {
            engine,
            state: PlaybackState::Stopped,
            current: None,
            index: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_track(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Playlist index the current track was started from.
    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().and(self.index)
    }

    /// Toggle playback, or start `filename` when given.
    ///
    /// - with a file name: play it from the start, whatever the state;
    /// - playing: pause;
    /// - paused: resume;
    /// - stopped: restart the last played playlist entry, if there is one.
    ///
    /// When the engine is unusable or fails, the state drops to `Stopped`.
    pub fn play_pause(
        &mut self,
        folder: &Path,
        playlist: &[String],
        filename: Option<&str>,
    ) -> PlaybackState {
        if !self.engine.is_ready() {
            tracing::error!(engine = self.engine.name(), "audio engine not initialized, cannot play");
            self.force_stopped();
            return self.state;
        }

        if let Some(name) = filename {
            let index = playlist.iter().position(|f| f == name);
            self.start(folder, name, index);
            return self.state;
        }

        match self.state {
            PlaybackState::Playing => match self.engine.pause() {
                Ok(()) => {
                    self.state = PlaybackState::Paused;
                    tracing::info!(track = self.current.as_deref(), "paused playback");
                }
                Err(e) => self.fail("pause", &e),
            },
            PlaybackState::Paused => match self.engine.resume() {
                Ok(()) => {
                    self.state = PlaybackState::Playing;
                    tracing::info!(track = self.current.as_deref(), "resumed playback");
                }
                Err(e) => self.fail("resume", &e),
            },
            PlaybackState::Stopped => {
                match self.index.and_then(|i| playlist.get(i).map(|name| (i, name))) {
                    Some((i, name)) => self.start(folder, name, Some(i)),
                    None => tracing::info!("nothing to resume"),
                }
            }
        }
        self.state
    }

    /// Halt playback and forget the current track.
    pub fn stop(&mut self) -> PlaybackState {
        if self.engine.is_ready() {
            if let Err(e) = self.engine.stop() {
                tracing::warn!(error = %e, "audio engine failed to stop");
            }
        }
        self.force_stopped();
        tracing::info!("stopped playback");
        self.state
    }

    pub fn shutdown(&mut self) {
        self.force_stopped();
        self.engine.shutdown();
    }

    fn start(&mut self, folder: &Path, name: &str, index: Option<usize>) {
        if !is_plain_file_name(name) {
            tracing::warn!(track = name, "refusing to play a path outside the music folder");
            self.force_stopped();
            return;
        }

        match self.engine.play(&folder.join(name)) {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                self.current = Some(name.to_string());
                self.index = index;
                tracing::info!(track = name, index, "started playing");
            }
            Err(e) => {
                tracing::warn!(track = name, error = %e, "failed to load or play track");
                self.force_stopped();
            }
        }
    }

    fn fail(&mut self, action: &str, err: &EngineError) {
        tracing::warn!(action, error = %err, "audio engine failed");
        self.force_stopped();
    }

    fn force_stopped(&mut self) {
        self.state = PlaybackState::Stopped;
        self.current = None;
    }
}
