//! One run of the relaxation reminder.

use std::sync::Arc;

use {
    parking_lot::Mutex,
    rand::thread_rng,
    tracing::{debug, error},
};

use crate::notification::{
    channel::REMINDER_CHANNEL, notifier::Notifier, permission::PermissionProvider,
    texts::ReminderTextPicker,
};

/// Outcome of one run. Failures are final; the run is not retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkResult {
    /// A reminder was posted.
    Success,
    /// Nothing was posted.
    Failure,
}

/// Posts one reminder per run when the user has allowed it.
pub struct NotificationWorker {
    notifier: Arc<dyn Notifier>,
    permission: Arc<dyn PermissionProvider>,
    picker: Mutex<ReminderTextPicker>,
}

impl NotificationWorker {
    /// Creates a worker.
    ///
    /// # Arguments
    ///
    /// * `notifier` - Where reminders are posted.
    /// * `permission` - Whether posting is allowed, asked on every run.
    pub fn new(notifier: Arc<dyn Notifier>, permission: Arc<dyn PermissionProvider>) -> Self {
        Self {
            notifier,
            permission,
            picker: Mutex::new(ReminderTextPicker::new()),
        }
    }

    /// Checks the permission and posts one reminder.
    ///
    /// # Returns
    ///
    /// `WorkResult::Failure` when permission is missing or posting failed,
    /// `WorkResult::Success` otherwise.
    pub fn do_work(&self) -> WorkResult {
        debug!("Starting notification work");

        if !self.permission.has_notification_permission() {
            error!("Notification permission not granted");
            return WorkResult::Failure;
        }

        if let Err(e) = self.notifier.ensure_channel(&REMINDER_CHANNEL) {
            error!("Error registering notification channel: {e}");
            return WorkResult::Failure;
        }

        let text = self.picker.lock().pick(&mut thread_rng());
        debug!("Selected notification text: {}", text.title);

        match self.notifier.post(&REMINDER_CHANNEL, text) {
            Ok(()) => {
                debug!("Notification shown successfully");
                WorkResult::Success
            }
            Err(e) => {
                error!("Error showing notification: {e}");
                WorkResult::Failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        config::NotificationPermission,
        notification::{
            testing::{FakeNotifier, FixedPermission},
            worker::{NotificationWorker, WorkResult},
        },
    };

    #[test]
    fn test_denied_permission_posts_nothing() {
        for permission in [NotificationPermission::NotAsked, NotificationPermission::Denied] {
            let notifier = Arc::new(FakeNotifier::default());
            let worker =
                NotificationWorker::new(notifier.clone(), Arc::new(FixedPermission(permission)));

            assert_eq!(worker.do_work(), WorkResult::Failure);
            assert!(notifier.posted().is_empty());
            assert_eq!(notifier.channel_registrations(), 0);
        }
    }

    #[test]
    fn test_granted_permission_posts_one_reminder() {
        let notifier = Arc::new(FakeNotifier::default());
        let worker = NotificationWorker::new(
            notifier.clone(),
            Arc::new(FixedPermission(NotificationPermission::Granted)),
        );

        assert_eq!(worker.do_work(), WorkResult::Success);

        let posted = notifier.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0, "backtune_notification_channel");
        assert_eq!(notifier.channel_registrations(), 1);
    }

    #[test]
    fn test_consecutive_runs_rotate_text() {
        let notifier = Arc::new(FakeNotifier::default());
        let worker = NotificationWorker::new(
            notifier.clone(),
            Arc::new(FixedPermission(NotificationPermission::Granted)),
        );

        for _ in 0..20 {
            worker.do_work();
        }

        let posted = notifier.posted();
        assert_eq!(posted.len(), 20);
        assert!(posted.windows(2).all(|pair| pair[0].1 != pair[1].1));
    }

    #[test]
    fn test_post_failure_is_reported() {
        let notifier = Arc::new(FakeNotifier::failing());
        let worker = NotificationWorker::new(
            notifier.clone(),
            Arc::new(FixedPermission(NotificationPermission::Granted)),
        );

        assert_eq!(worker.do_work(), WorkResult::Failure);
        assert!(notifier.posted().is_empty());
    }
}
