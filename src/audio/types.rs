//! Audio-related small types.
//!
//! This module defines the commands understood by the audio thread and the
//! errors an engine can report back.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No output device could be opened; the engine stays unusable.
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("failed to open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("audio thread is not running")]
    Disconnected,
}

pub type Reply = Sender<Result<(), EngineError>>;

#[derive(Debug)]
pub enum AudioCmd {
    /// Load the file and start playing it, replacing whatever was loaded.
    Play(PathBuf, Reply),
    Pause(Reply),
    Resume(Reply),
    /// Stop playback and drop the loaded file.
    Stop(Reply),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
