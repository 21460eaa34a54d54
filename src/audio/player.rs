//! The seam between the playback delegate and a concrete audio backend.

use std::path::Path;

use crate::error::AudioError;

/// A single-sound looping player handle.
///
/// `AudioEngine` is the production implementation; the playback delegate
/// only ever talks to this trait so it can be driven by a fake in tests.
pub trait SoundPlayer: Send {
    /// Stops whatever is playing and starts looping the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` if the file or the output device cannot be opened.
    fn play_file(&mut self, path: &Path) -> Result<(), AudioError>;

    /// Pauses the current sound.
    fn pause(&mut self);

    /// Resumes the current sound if one is loaded.
    fn resume(&mut self);

    /// Returns whether a sound is audibly playing.
    fn is_playing(&self) -> bool;

    /// Applies an output gain. Implementations clamp to [0, 1].
    fn set_volume(&mut self, volume: f32);

    /// Frees the underlying audio resources.
    fn release(&mut self);
}
