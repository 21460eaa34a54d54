//! Playback delegate owning the single ambient sound player.
//!
//! Every failure in here is logged and swallowed: a missing resource or a
//! device error leaves the caller's state untouched and never reaches the UI.

use tracing::{debug, error};

use crate::{
    audio::SoundPlayer,
    error::{ErrorReporter, ResultExt},
    model::AmbientSound,
    service::resources::SoundLibrary,
};

/// Owns the one player handle and forwards user actions to it.
pub struct BackgroundSoundService<P: SoundPlayer> {
    /// Player handle, `None` once released.
    player: Option<P>,
    /// Most recently requested sound.
    current_sound: Option<AmbientSound>,
    /// Where sound resources are looked up.
    library: SoundLibrary,
}

impl<P: SoundPlayer> BackgroundSoundService<P> {
    /// Creates a delegate around an initialized player.
    pub fn new(player: P, library: SoundLibrary) -> Self {
        Self {
            player: Some(player),
            current_sound: None,
            library,
        }
    }

    /// Stops the current sound and starts looping `sound`.
    ///
    /// A resource that cannot be located makes this a logged no-op.
    pub fn play_sound(&mut self, sound: &AmbientSound) {
        self.current_sound = Some(sound.clone());

        let Some(player) = self.player.as_mut() else {
            debug!("Ignoring play request for {}: player released", sound.id);
            return;
        };

        let Some(path) = self.library.resolve(&sound.resource_name) else {
            error!(
                "Resource not found: {} in {:?}",
                sound.resource_name,
                self.library.root()
            );
            return;
        };

        let result = player
            .play_file(&path)
            .add_contextf(format!("Playing sound {} from {:?}", sound.name, path));
        if ErrorReporter::swallow(result, "play_sound").is_some() {
            debug!("Started playing: {}", sound.name);
        }
    }

    /// Pauses when playing, resumes otherwise.
    pub fn toggle_playback(&mut self) {
        if let Some(player) = self.player.as_mut() {
            if player.is_playing() {
                player.pause();
                debug!("Paused playback");
            } else {
                player.resume();
                debug!("Resumed playback");
            }
        }
    }

    /// Returns whether the sound is audibly playing; `false` once released.
    pub fn is_playing(&self) -> bool {
        self.player.as_ref().is_some_and(|player| player.is_playing())
    }

    /// Applies `volume` directly to the player.
    pub fn update_volume(&mut self, volume: f32) {
        if let Some(player) = self.player.as_mut() {
            player.set_volume(volume);
            debug!("Volume updated: {volume}");
        }
    }

    /// Frees the player handle. Later calls on the delegate are no-ops.
    pub fn release(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.release();
            debug!("Player released");
        }
    }

    /// Gets the most recently requested sound.
    pub fn current_sound(&self) -> Option<&AmbientSound> {
        self.current_sound.as_ref()
    }
}
