use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use crate::config::AudioSettings;

use super::engine::AudioEngine;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, EngineError, Reply};

/// Engine backed by a `rodio` output stream living on its own thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    ready: bool,
    fade_out_ms: u64,
    join: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    /// Spawn the audio thread and wait until it has tried to open the output.
    ///
    /// A player whose output could not be opened is still returned; it reports
    /// `is_ready() == false` and every command fails with
    /// `EngineError::Disconnected`.
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let fade_out_ms = audio_settings.stop_fade_out_ms;

        let audio_handle = spawn_audio_thread(rx, ready_tx, audio_settings);

        let ready = match ready_rx.recv() {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "audio engine failed to initialize");
                false
            }
            Err(_) => {
                tracing::warn!("audio thread exited during startup");
                false
            }
        };

        Self {
            tx,
            ready,
            fade_out_ms,
            join: Some(audio_handle),
        }
    }

    /// Send a command and block until the audio thread answers it.
    fn request(&self, cmd: impl FnOnce(Reply) -> AudioCmd) -> Result<(), EngineError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(cmd(reply_tx))
            .map_err(|_| EngineError::Disconnected)?;
        reply_rx.recv().map_err(|_| EngineError::Disconnected)?
    }
}

impl AudioEngine for AudioPlayer {
    fn name(&self) -> &'static str {
        "rodio"
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn play(&mut self, path: &Path) -> Result<(), EngineError> {
        let path = path.to_path_buf();
        self.request(|reply| AudioCmd::Play(path, reply))
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.request(AudioCmd::Pause)
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        self.request(AudioCmd::Resume)
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.request(AudioCmd::Stop)
    }

    fn shutdown(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: self.fade_out_ms,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
