//! User preferences and persistent settings.
//!
//! This module provides user preference management with XDG Base Directory
//! compliance.

pub mod settings;

pub use settings::{
    NotificationPermission, SettingsError, SettingsManager, UserSettings, get_cache_dir,
    get_config_path, get_default_sounds_dir,
};
