//! User preference management with XDG Base Directory compliance.
//!
//! This module provides user settings management with proper XDG directory
//! usage for config, data and cache files.

use std::{
    env::var,
    fs::{create_dir_all, read_to_string, write},
    io::Error as StdError,
    path::PathBuf,
};

use {
    parking_lot::{RwLock, RwLockReadGuard},
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str, to_string_pretty},
    thiserror::Error,
    tracing::debug,
};

/// Application directory name used under every XDG base directory.
const APP_DIR_NAME: &str = "backtune";

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Whether the user allowed relaxation reminders to be posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    /// The user has not been asked yet.
    #[default]
    NotAsked,
    /// Reminders may be posted.
    Granted,
    /// Reminders must not be posted.
    Denied,
}

impl NotificationPermission {
    /// Returns `true` only for an explicit grant.
    #[must_use]
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Serializable user settings structure with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Audio output device name (default device when unset).
    pub audio_device: Option<String>,
    /// Output buffer duration in milliseconds.
    pub buffer_duration_ms: u32,
    /// Directory holding the ambient sound files.
    pub sounds_directory: Option<String>,
    /// Answer to the reminder notification prompt.
    pub notification_permission: NotificationPermission,
    /// Whether entering the player screen opens the video in the browser.
    pub open_video_in_browser: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            audio_device: None,
            buffer_duration_ms: 50,
            sounds_directory: None,
            notification_permission: NotificationPermission::NotAsked,
            open_video_in_browser: true,
        }
    }
}

impl UserSettings {
    /// Resolves the directory the ambient sounds are loaded from.
    ///
    /// # Returns
    ///
    /// The configured directory, or the XDG data default.
    #[must_use]
    pub fn sounds_dir(&self) -> PathBuf {
        self.sounds_directory
            .as_ref()
            .map_or_else(get_default_sounds_dir, PathBuf::from)
    }
}

/// Handles loading, saving, and validation of user preferences.
#[derive(Debug)]
pub struct SettingsManager {
    /// Thread-safe user settings storage.
    settings: RwLock<UserSettings>,
    /// Path to the configuration file on disk.
    config_path: PathBuf,
}

impl SettingsManager {
    /// Creates a new settings manager with default config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn new() -> Result<Self, SettingsError> {
        Self::with_config_path(get_config_path())
    }

    /// Creates a new settings manager with a custom config path.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Custom path for the settings file
    ///
    /// # Returns
    ///
    /// A `Result` containing the `SettingsManager` or a `SettingsError`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file exists but cannot be read or parsed,
    /// or if it contains invalid values.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            create_dir_all(parent)?;
        }

        let settings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            from_str(&contents)?
        } else {
            debug!("Using default settings, file not found: {:?}", config_path);
            UserSettings::default()
        };

        validate(&settings)?;

        Ok(SettingsManager {
            settings: RwLock::new(settings),
            config_path,
        })
    }

    /// Gets the current settings.
    pub fn get_settings(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.settings.read()
    }

    /// Gets the configuration file path.
    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Records the answer to the reminder permission prompt and saves it.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be saved to disk.
    pub fn set_notification_permission(
        &self,
        permission: NotificationPermission,
    ) -> Result<(), SettingsError> {
        self.settings.write().notification_permission = permission;
        self.save_settings()
    }

    /// Saves the current settings to disk.
    fn save_settings(&self) -> Result<(), SettingsError> {
        debug!("Saving settings to file: {:?}", self.config_path);
        let contents = to_string_pretty(&*self.settings.read())?;
        write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Rejects values the audio output cannot work with.
fn validate(settings: &UserSettings) -> Result<(), SettingsError> {
    if !(1..=1000).contains(&settings.buffer_duration_ms) {
        return Err(SettingsError::InvalidValue {
            reason: format!(
                "buffer_duration_ms must be between 1 and 1000, got {}",
                settings.buffer_duration_ms
            ),
        });
    }
    Ok(())
}

/// Ensures proper XDG directory usage for config and cache files.
///
/// # Returns
///
/// The path to the configuration file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_xdg_dir("XDG_CONFIG_HOME", ".config");
    config_dir.push(APP_DIR_NAME);
    config_dir.push("settings.json");
    config_dir
}

/// Gets the cache directory path (log file location).
#[must_use]
pub fn get_cache_dir() -> PathBuf {
    let mut cache_dir = get_xdg_dir("XDG_CACHE_HOME", ".cache");
    cache_dir.push(APP_DIR_NAME);
    cache_dir
}

/// Gets the default directory holding the ambient sound files.
#[must_use]
pub fn get_default_sounds_dir() -> PathBuf {
    let mut data_dir = get_xdg_dir("XDG_DATA_HOME", ".local/share");
    data_dir.push(APP_DIR_NAME);
    data_dir.push("sounds");
    data_dir
}

/// Resolves an XDG base directory.
///
/// Uses the given environment variable if set, otherwise `$HOME/<fallback>`.
fn get_xdg_dir(env_key: &str, home_fallback: &str) -> PathBuf {
    if let Ok(dir) = var(env_key)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(home_fallback);
        return path;
    }

    // HOME is always set on Unix
    PathBuf::from(".")
}
