//! Where the worker learns whether it may post.

use crate::config::{NotificationPermission, SettingsManager};

/// Answers whether notifications may be posted.
pub trait PermissionProvider: Send + Sync {
    /// Gets the current permission state.
    fn notification_permission(&self) -> NotificationPermission;

    /// Checks whether posting is allowed.
    fn has_notification_permission(&self) -> bool {
        self.notification_permission().is_granted()
    }
}

impl PermissionProvider for SettingsManager {
    fn notification_permission(&self) -> NotificationPermission {
        self.get_settings().notification_permission
    }
}
