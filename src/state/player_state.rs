//! Player screen view-model with reactive update notifications.
//!
//! `PlayerState` holds the flags the player screen renders from and forwards
//! user actions to the playback delegate. Every change is broadcast so
//! observers can redraw without polling.

use std::sync::Arc;

use {
    parking_lot::{Mutex, RwLock},
    tokio::{
        sync::broadcast::{Receiver, Sender, channel},
        task::{JoinHandle, spawn_blocking},
    },
    tracing::debug,
};

use crate::{
    audio::{AudioEngine, SoundPlayer},
    model::{AmbientSound, available_sounds},
    service::BackgroundSoundService,
};

/// Volume the player screen starts with.
pub const INITIAL_VOLUME: f32 = 0.5;

/// Point-in-time copy of the observable flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    /// Sound chosen in the selection sheet, if any.
    pub selected_sound: Option<AmbientSound>,
    /// Volume in [0, 1].
    pub volume: f32,
    /// Whether the background sound is playing.
    pub is_background_playing: bool,
    /// Whether the sound selection sheet is shown.
    pub is_sound_selection_visible: bool,
}

/// Player state change events.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerStateEvent {
    /// Selected sound changed.
    SelectedSoundChanged(Option<AmbientSound>),
    /// Volume changed.
    VolumeChanged(f32),
    /// Background playing flag changed.
    BackgroundPlayingChanged(bool),
    /// Sound selection sheet shown or hidden.
    SoundSelectionVisibilityChanged(bool),
}

/// Observable flags plus the delegate they drive.
///
/// The flags live behind shared locks so the fire-and-forget selection task
/// can update them from a worker thread.
pub struct PlayerState<P: SoundPlayer + 'static = AudioEngine> {
    /// Currently selected sound.
    selected_sound: Arc<RwLock<Option<AmbientSound>>>,
    /// Current volume, always within [0, 1].
    volume: Arc<RwLock<f32>>,
    /// Whether the background sound is playing.
    is_background_playing: Arc<RwLock<bool>>,
    /// Whether the sound selection sheet is visible.
    is_sound_selection_visible: Arc<RwLock<bool>>,
    /// The playback delegate.
    service: Arc<Mutex<BackgroundSoundService<P>>>,
    /// The fixed sound catalogue.
    sounds: Vec<AmbientSound>,
    /// Broadcast channel for state change notifications.
    state_tx: Sender<PlayerStateEvent>,
}

impl<P: SoundPlayer + 'static> PlayerState<P> {
    /// Creates the view-model around a playback delegate.
    pub fn new(service: BackgroundSoundService<P>) -> Self {
        let (state_tx, _) = channel(16);

        Self {
            selected_sound: Arc::new(RwLock::new(None)),
            volume: Arc::new(RwLock::new(INITIAL_VOLUME)),
            is_background_playing: Arc::new(RwLock::new(false)),
            is_sound_selection_visible: Arc::new(RwLock::new(false)),
            service: Arc::new(Mutex::new(service)),
            sounds: available_sounds(),
            state_tx,
        }
    }

    /// Gets the sounds offered in the selection sheet.
    pub fn available_sounds(&self) -> &[AmbientSound] {
        &self.sounds
    }

    /// Gets the selected sound.
    pub fn selected_sound(&self) -> Option<AmbientSound> {
        self.selected_sound.read().clone()
    }

    /// Gets the volume.
    pub fn volume(&self) -> f32 {
        *self.volume.read()
    }

    /// Gets whether the background sound is playing.
    pub fn is_background_playing(&self) -> bool {
        *self.is_background_playing.read()
    }

    /// Gets whether the sound selection sheet is visible.
    pub fn is_sound_selection_visible(&self) -> bool {
        *self.is_sound_selection_visible.read()
    }

    /// Copies all flags at once for rendering.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            selected_sound: self.selected_sound(),
            volume: self.volume(),
            is_background_playing: self.is_background_playing(),
            is_sound_selection_visible: self.is_sound_selection_visible(),
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> Receiver<PlayerStateEvent> {
        self.state_tx.subscribe()
    }

    /// Shows the sound selection sheet.
    pub fn show_sound_selection(&self) {
        set_visibility(&self.is_sound_selection_visible, &self.state_tx, true);
    }

    /// Hides the sound selection sheet.
    pub fn hide_sound_selection(&self) {
        set_visibility(&self.is_sound_selection_visible, &self.state_tx, false);
    }

    /// Selects `sound` and starts playing it.
    ///
    /// Fire-and-forget: the work runs on a blocking worker and the returned
    /// handle may be dropped. A second selection issued before the first
    /// finishes is not ordered against it; whichever runs last wins.
    ///
    /// Must be called from within a tokio runtime.
    pub fn select_sound(&self, sound: AmbientSound) -> JoinHandle<()> {
        let selected_sound = Arc::clone(&self.selected_sound);
        let is_background_playing = Arc::clone(&self.is_background_playing);
        let is_sound_selection_visible = Arc::clone(&self.is_sound_selection_visible);
        let service = Arc::clone(&self.service);
        let state_tx = self.state_tx.clone();

        spawn_blocking(move || {
            debug!("Selecting sound {}", sound.id);
            *selected_sound.write() = Some(sound.clone());
            let _ = state_tx.send(PlayerStateEvent::SelectedSoundChanged(Some(sound.clone())));

            service.lock().play_sound(&sound);

            *is_background_playing.write() = true;
            let _ = state_tx.send(PlayerStateEvent::BackgroundPlayingChanged(true));

            set_visibility(&is_sound_selection_visible, &state_tx, false);
        })
    }

    /// Toggles the background sound and mirrors the delegate's playing state.
    pub fn toggle_background_playback(&self) {
        let playing = {
            let mut service = self.service.lock();
            service.toggle_playback();
            service.is_playing()
        };
        *self.is_background_playing.write() = playing;
        let _ = self
            .state_tx
            .send(PlayerStateEvent::BackgroundPlayingChanged(playing));
    }

    /// Stores the volume clamped to [0, 1] and forwards the raw value.
    pub fn update_volume(&self, new_volume: f32) {
        let clamped = if new_volume.is_nan() {
            0.0
        } else {
            new_volume.clamp(0.0, 1.0)
        };
        *self.volume.write() = clamped;
        self.service.lock().update_volume(new_volume);
        let _ = self.state_tx.send(PlayerStateEvent::VolumeChanged(clamped));
    }
}

impl<P: SoundPlayer + 'static> Drop for PlayerState<P> {
    fn drop(&mut self) {
        self.service.lock().release();
    }
}

/// Updates the sheet visibility flag and notifies subscribers.
fn set_visibility(flag: &RwLock<bool>, state_tx: &Sender<PlayerStateEvent>, visible: bool) {
    *flag.write() = visible;
    let _ = state_tx.send(PlayerStateEvent::SoundSelectionVisibilityChanged(visible));
}
