//! BackTune - YouTube with your own background sound
//!
//! A terminal companion for watching YouTube videos while a looping ambient
//! sound (rain, waves, forest) plays at an adjustable volume, with periodic
//! desktop reminders to take a relaxing break.

pub mod audio;
pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod notification;
pub mod service;
pub mod state;
pub mod ui;
pub mod video;

// Re-export key types for convenience
pub use {
    audio::{AudioEngine, OutputConfig, PlaybackState, SoundPlayer},
    config::{NotificationPermission, SettingsManager, UserSettings},
    error::{AudioError, NotificationError, UiError},
    model::{AmbientSound, available_sounds},
    navigation::{Navigator, Screen},
    notification::{NotificationScheduler, NotificationWorker},
    service::{BackgroundSoundService, SoundLibrary},
    state::{PlayerState, PlayerStateEvent, SharedIntentState},
    ui::BackTuneApplication,
    video::{VideoId, parse_video_url},
};
