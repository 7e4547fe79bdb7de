use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::sink::create_sink;
use super::types::{AudioCmd, EngineError};

/// Spawn the thread owning the output stream.
///
/// The outcome of opening the default output device is sent on `ready`
/// before any command is processed.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    ready: Sender<Result<(), EngineError>>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(EngineError::Unavailable(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when the OutputStream is dropped.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut sink: Option<Sink> = None;
        let mut paused = true;

        while let Ok(cmd) = rx.recv() {
            match cmd {
                AudioCmd::Play(path, reply) => {
                    let result = create_sink(&stream, &path).map(|new_sink| {
                        swap_in(&mut sink, new_sink, paused, &audio_settings);
                        paused = false;
                    });
                    if result.is_err() {
                        stop_sink(&mut sink, 0);
                        paused = true;
                    }
                    let _ = reply.send(result);
                }
                AudioCmd::Pause(reply) => {
                    if let Some(s) = sink.as_ref() {
                        s.pause();
                        paused = true;
                    }
                    let _ = reply.send(Ok(()));
                }
                AudioCmd::Resume(reply) => {
                    if let Some(s) = sink.as_ref() {
                        s.play();
                        paused = false;
                    }
                    let _ = reply.send(Ok(()));
                }
                AudioCmd::Stop(reply) => {
                    let fade = if paused {
                        0
                    } else {
                        audio_settings.stop_fade_out_ms
                    };
                    stop_sink(&mut sink, fade);
                    paused = true;
                    let _ = reply.send(Ok(()));
                }
                AudioCmd::Quit { fade_out_ms } => {
                    let fade = if paused { 0 } else { fade_out_ms };
                    stop_sink(&mut sink, fade);
                    break;
                }
            }
        }

        tracing::debug!("audio thread exiting");
    })
}

/// Start `new_sink`, crossfading from the current one if it is audible.
fn swap_in(
    sink: &mut Option<Sink>,
    new_sink: Sink,
    paused: bool,
    audio_settings: &AudioSettings,
) {
    let crossfade_ms = audio_settings.crossfade_ms;
    let crossfade_steps = audio_settings.crossfade_steps.max(1);

    // Keep the default volume sane even if crossfade is disabled.
    new_sink.set_volume(1.0);

    if let Some(old_sink) = sink.as_ref() {
        if !paused && crossfade_ms > 0 {
            old_sink.set_volume(1.0);
            new_sink.set_volume(0.0);
            new_sink.play();

            // Blocking fade; audio keeps flowing in rodio's mixer thread.
            for step in 1..=crossfade_steps {
                let t = (step as f32) / (crossfade_steps as f32);
                old_sink.set_volume(1.0 - t);
                new_sink.set_volume(t);
                thread::sleep(Duration::from_millis(
                    (crossfade_ms / crossfade_steps).max(1),
                ));
            }
        }
        old_sink.stop();
    }

    new_sink.play();
    *sink = Some(new_sink);
}

fn stop_sink(sink: &mut Option<Sink>, fade_out_ms: u64) {
    if let Some(s) = sink.take() {
        fade_out_sink(&s, fade_out_ms);
        s.stop();
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
