//! Periodic relaxation reminders posted as desktop notifications.

pub mod channel;
pub mod notifier;
pub mod permission;
pub mod scheduler;
pub mod texts;
pub mod worker;

pub use {
    channel::{Importance, NotificationChannel, REMINDER_CHANNEL},
    notifier::{DesktopNotifier, Notifier},
    permission::PermissionProvider,
    scheduler::{NotificationScheduler, REMINDER_INTERVAL, SchedulerHandle},
    texts::{REMINDER_TEXTS, ReminderText, ReminderTextPicker},
    worker::{NotificationWorker, WorkResult},
};
