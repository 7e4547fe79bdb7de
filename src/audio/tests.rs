use super::*;
use std::path::{Path, PathBuf};

#[test]
fn simulated_engine_tracks_loaded_file_and_pause_flag() {
    let mut engine = SimulatedEngine::new();
    assert!(engine.is_ready());
    assert_eq!(engine.loaded(), None);

    engine.play(Path::new("/music/a.mp3")).unwrap();
    assert_eq!(engine.loaded(), Some(Path::new("/music/a.mp3")));
    assert!(!engine.is_paused());

    engine.pause().unwrap();
    assert!(engine.is_paused());
    engine.resume().unwrap();
    assert!(!engine.is_paused());

    engine.stop().unwrap();
    assert_eq!(engine.loaded(), None);
}

#[test]
fn simulated_engine_does_not_require_the_file_to_exist() {
    let mut engine = SimulatedEngine::new();
    assert!(engine.play(Path::new("/definitely/not/here.wav")).is_ok());
}

#[test]
fn engine_errors_name_the_offending_file() {
    let err = EngineError::Decode {
        path: PathBuf::from("/music/broken.mp3"),
        reason: "unsupported format".into(),
    };
    assert_eq!(
        err.to_string(),
        "failed to decode /music/broken.mp3: unsupported format"
    );
    assert_eq!(
        EngineError::Disconnected.to_string(),
        "audio thread is not running"
    );
}
