//! Posting reminders to the desktop notification service.

use std::sync::atomic::{AtomicBool, Ordering::SeqCst};

use {
    notify_rust::{Notification, Timeout},
    tracing::debug,
};

use crate::{
    error::NotificationError,
    notification::{channel::NotificationChannel, texts::ReminderText},
};

/// Name the notifications are attributed to.
const APP_NAME: &str = "BackTune";

/// Destination for reminder notifications.
pub trait Notifier: Send + Sync {
    /// Registers `channel` with the notification service. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the service refused the channel.
    fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), NotificationError>;

    /// Posts one notification on `channel`.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::PostFailed` if the service rejected it.
    fn post(
        &self,
        channel: &NotificationChannel,
        text: &ReminderText,
    ) -> Result<(), NotificationError>;
}

/// Posts notifications through the freedesktop, macOS or Windows service.
///
/// Desktop services have no channel registry, so the channel only shapes
/// how each notification is presented.
#[derive(Debug, Default)]
pub struct DesktopNotifier {
    channel_ready: AtomicBool,
}

impl DesktopNotifier {
    /// Creates a notifier with no channel registered yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for DesktopNotifier {
    fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), NotificationError> {
        if !self.channel_ready.swap(true, SeqCst) {
            debug!(
                id = channel.id,
                name = channel.name,
                "Registered notification channel: {}",
                channel.description
            );
        }
        Ok(())
    }

    fn post(
        &self,
        channel: &NotificationChannel,
        text: &ReminderText,
    ) -> Result<(), NotificationError> {
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(text.title)
            .body(&text.body())
            .timeout(Timeout::Default);

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            use {crate::notification::channel::Importance, notify_rust::Urgency};

            notification.urgency(match channel.importance {
                Importance::High => Urgency::Critical,
                Importance::Default => Urgency::Normal,
            });
        }

        notification
            .show()
            .map_err(|e| NotificationError::PostFailed(e.to_string()))?;
        debug!(channel = channel.id, "Posted notification: {}", text.title);
        Ok(())
    }
}
