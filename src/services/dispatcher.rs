use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

use crate::db::models::{Notification, NotificationType, UserRole};
use crate::db::repositories::{NotificationStore, UserStore};
use crate::error::{AppError, AppResult};
use crate::events::{Event, EventBus};

/// Persists notification records and pushes them onto the live event feed.
///
/// Persisting and pushing are not atomic: the feed push is best-effort and
/// a failure there never rolls back the stored record.
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationStore>,
    users: Arc<dyn UserStore>,
    bus: EventBus,
}

fn generate_notification_id() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
    format!("NOTIF-{}-{}", Utc::now().timestamp_millis(), suffix)
}

impl NotificationDispatcher {
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        users: Arc<dyn UserStore>,
        bus: EventBus,
    ) -> Self {
        Self {
            notifications,
            users,
            bus,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn send_to_user(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
        kind: NotificationType,
        report_id: Option<&str>,
        sender_id: Option<&str>,
        sender_name: Option<&str>,
    ) -> AppResult<Notification> {
        if user_id.trim().is_empty() {
            return Err(AppError::Validation(
                "notification target user id is empty".to_string(),
            ));
        }

        let notification = Notification {
            notification_id: generate_notification_id(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            report_id: report_id.map(str::to_string),
            sender_id: sender_id.map(str::to_string),
            sender_name: sender_name.map(str::to_string),
            read: false,
            timestamp: Utc::now().timestamp_millis(),
        };

        self.notifications.insert(&notification).await?;
        debug!(
            notification_id = %notification.notification_id,
            user_id,
            "notification stored: {title}"
        );

        // Best-effort device alert.
        self.bus.publish(&Event::Notification {
            notification: notification.clone(),
        });

        Ok(notification)
    }

    /// One write per active user with the given role; per-recipient
    /// failures are logged and skipped. Returns the delivered count.
    #[allow(clippy::too_many_arguments)]
    pub async fn send_to_role(
        &self,
        role: UserRole,
        title: &str,
        message: &str,
        kind: NotificationType,
        report_id: Option<&str>,
        sender_id: Option<&str>,
        sender_name: Option<&str>,
    ) -> AppResult<usize> {
        let recipients = self.users.list_active_by_role(role).await?;
        if recipients.is_empty() {
            warn!(?role, "no active users found for role fan-out");
            return Ok(0);
        }

        let mut delivered = 0;
        for user in &recipients {
            match self
                .send_to_user(
                    &user.user_id,
                    title,
                    message,
                    kind,
                    report_id,
                    sender_id,
                    sender_name,
                )
                .await
            {
                Ok(_) => delivered += 1,
                Err(err) => {
                    warn!(user_id = %user.user_id, "notification delivery failed: {err}");
                }
            }
        }
        debug!(?role, delivered, "role fan-out complete");
        Ok(delivered)
    }

    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        Ok(self.notifications.list_for_user(user_id).await?)
    }

    pub async fn unread_count(&self, user_id: &str) -> AppResult<i64> {
        Ok(self.notifications.unread_count(user_id).await?)
    }

    pub async fn mark_read(&self, notification_id: &str) -> AppResult<()> {
        Ok(self.notifications.mark_read(notification_id).await?)
    }

    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<u64> {
        Ok(self.notifications.mark_all_read(user_id).await?)
    }

    pub async fn delete(&self, notification_id: &str) -> AppResult<()> {
        Ok(self.notifications.delete(notification_id).await?)
    }

    pub async fn clear_all(&self, user_id: &str) -> AppResult<u64> {
        Ok(self.notifications.clear_for_user(user_id).await?)
    }
}
