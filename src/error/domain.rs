//! Domain-specific error types using `thiserror`.
//!
//! This module defines the main error enums for the different domains
//! within BackTune: audio playback, reminder notifications and the UI.

use std::io::Error as IoError;

use thiserror::Error;

use crate::audio::{decoder::DecoderError, output::OutputError};

/// Audio-related errors.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Decoder error from the audio decoder module.
    #[error("Decoder error: {0}")]
    DecoderError(#[from] DecoderError),
    /// Output error from the audio output module.
    #[error("Output error: {0}")]
    OutputError(#[from] OutputError),
    /// Invalid operation for current state.
    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },
    /// The player handle has already been released.
    #[error("Player has been released")]
    Released,
}

/// Reminder notification errors.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The desktop notification service rejected the notification.
    #[error("Failed to post notification: {0}")]
    PostFailed(String),
}

/// UI-related errors.
#[derive(Error, Debug)]
pub enum UiError {
    /// Drawing, input or terminal mode error.
    #[error("Terminal error: {0}")]
    TerminalError(#[from] IoError),
}

#[cfg(test)]
mod tests {
    use std::io::{Error, ErrorKind};

    use crate::error::domain::{AudioError, NotificationError, UiError};

    #[test]
    fn test_audio_error_display() {
        assert_eq!(AudioError::Released.to_string(), "Player has been released");

        let invalid_op_error = AudioError::InvalidOperation {
            reason: "test reason".to_string(),
        };
        assert_eq!(
            invalid_op_error.to_string(),
            "Invalid operation: test reason"
        );
    }

    #[test]
    fn test_notification_error_display() {
        assert_eq!(
            NotificationError::PostFailed("dbus unavailable".to_string()).to_string(),
            "Failed to post notification: dbus unavailable"
        );
    }

    #[test]
    fn test_ui_error_from_io() {
        let io_error = Error::new(ErrorKind::BrokenPipe, "terminal closed");
        let ui_error = UiError::from(io_error);
        assert_eq!(ui_error.to_string(), "Terminal error: terminal closed");
    }
}
