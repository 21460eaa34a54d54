//! Playback delegate and sound resource lookup.

pub mod resources;
pub mod sound_service;

pub use {resources::SoundLibrary, sound_service::BackgroundSoundService};

#[cfg(test)]
pub(crate) mod testing {
    //! Recording fake for the `SoundPlayer` seam.

    use std::{
        path::{Path, PathBuf},
        sync::Arc,
    };

    use parking_lot::Mutex;

    use crate::{audio::SoundPlayer, error::AudioError};

    /// A call observed by `FakePlayer`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum PlayerCall {
        PlayFile(PathBuf),
        Pause,
        Resume,
        SetVolume(f32),
        Release,
    }

    /// Player that records every call and tracks a playing flag.
    pub struct FakePlayer {
        pub playing: bool,
        pub loaded: bool,
        pub fail_next_play: bool,
        calls: Arc<Mutex<Vec<PlayerCall>>>,
    }

    impl FakePlayer {
        pub fn new() -> (Self, Arc<Mutex<Vec<PlayerCall>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let player = Self {
                playing: false,
                loaded: false,
                fail_next_play: false,
                calls: Arc::clone(&calls),
            };
            (player, calls)
        }
    }

    impl SoundPlayer for FakePlayer {
        fn play_file(&mut self, path: &Path) -> Result<(), AudioError> {
            self.calls.lock().push(PlayerCall::PlayFile(path.to_path_buf()));
            if self.fail_next_play {
                self.fail_next_play = false;
                return Err(AudioError::InvalidOperation {
                    reason: "fake failure".to_string(),
                });
            }
            self.loaded = true;
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.calls.lock().push(PlayerCall::Pause);
            self.playing = false;
        }

        fn resume(&mut self) {
            self.calls.lock().push(PlayerCall::Resume);
            self.playing = self.loaded;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }

        fn set_volume(&mut self, volume: f32) {
            self.calls.lock().push(PlayerCall::SetVolume(volume));
        }

        fn release(&mut self) {
            self.calls.lock().push(PlayerCall::Release);
            self.playing = false;
            self.loaded = false;
        }
    }
}
