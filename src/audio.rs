//! Audio engines: the `rodio`-backed player and a simulated stand-in.

mod engine;
mod player;
mod sink;
mod thread;
mod types;

pub use engine::{AudioEngine, SimulatedEngine};
pub use player::AudioPlayer;
pub use types::EngineError;

#[cfg(test)]
mod tests;
