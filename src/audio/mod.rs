//! Ambient sound playback.
//!
//! Loops a single sound file through the default output device using cpal,
//! symphonia and rtrb, converting channels and sample rate with rubato when the
//! device format differs from the file.

pub mod decoder;
pub mod engine;
pub mod output;
pub mod player;
pub mod resampler;

pub use {
    engine::{AudioEngine, PlaybackState},
    output::OutputConfig,
    player::SoundPlayer,
};
