//! The single reminder notification channel.

/// How prominently notifications on a channel are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    /// Shown without interrupting.
    Default,
    /// Shown prominently and kept on screen.
    High,
}

/// Identity and presentation of a notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    /// Stable channel identifier.
    pub id: &'static str,
    /// User-visible channel name.
    pub name: &'static str,
    /// User-visible channel description.
    pub description: &'static str,
    /// Presentation level.
    pub importance: Importance,
}

/// Channel every relaxation reminder is posted on.
pub const REMINDER_CHANNEL: NotificationChannel = NotificationChannel {
    id: "backtune_notification_channel",
    name: "BackTune Notifications",
    description: "Notifications for relaxation reminders",
    importance: Importance::High,
};
