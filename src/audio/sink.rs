//! Utilities for creating `rodio` sinks from files in the music folder.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` ready to be started.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use super::types::EngineError;

/// Create a paused `Sink` playing `path` from the start.
pub(super) fn create_sink(stream: &OutputStream, path: &Path) -> Result<Sink, EngineError> {
    let file = File::open(path).map_err(|e| EngineError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
