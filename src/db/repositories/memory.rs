//! In-memory store implementations used by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::models::{
    Feedback, MaintenanceReport, Notification, ReportStatus, StatusChange, User, UserRole,
    UserStatus,
};
use crate::db::DatabaseError;

use super::{FeedbackStore, NotificationStore, ReportStore, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        let map = users.into_iter().map(|u| (u.user_id.clone(), u)).collect();
        Self {
            users: Mutex::new(map),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.user_id) {
            return Err(DatabaseError::Duplicate);
        }
        users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn list_active_by_role(&self, role: UserRole) -> Result<Vec<User>, DatabaseError> {
        let users = self.users.lock().unwrap();
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| u.role == role && u.status == UserStatus::Active)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matching)
    }

    async fn list_all(&self) -> Result<Vec<User>, DatabaseError> {
        let mut all: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn set_status(&self, user_id: &str, status: UserStatus) -> Result<(), DatabaseError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(user_id).ok_or(DatabaseError::NotFound)?;
        user.status = status;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryReportStore {
    reports: Mutex<HashMap<String, MaintenanceReport>>,
    history: Mutex<HashMap<String, Vec<StatusChange>>>,
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn insert(&self, report: &MaintenanceReport) -> Result<(), DatabaseError> {
        let mut reports = self.reports.lock().unwrap();
        if reports.contains_key(&report.report_id) {
            return Err(DatabaseError::Duplicate);
        }
        reports.insert(report.report_id.clone(), report.clone());
        Ok(())
    }

    async fn find(&self, report_id: &str) -> Result<Option<MaintenanceReport>, DatabaseError> {
        Ok(self.reports.lock().unwrap().get(report_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<MaintenanceReport>, DatabaseError> {
        let mut all: Vec<MaintenanceReport> =
            self.reports.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(all)
    }

    async fn list_by_status(
        &self,
        status: ReportStatus,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|r| r.status == status)
            .collect())
    }

    async fn list_by_reporter(
        &self,
        reporter_id: &str,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|r| r.reporter_id == reporter_id)
            .collect())
    }

    async fn list_by_technician(
        &self,
        technician_id: &str,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|r| r.assigned_technician_id.as_deref() == Some(technician_id))
            .collect())
    }

    async fn assign(
        &self,
        report_id: &str,
        technician_id: &str,
        technician_name: &str,
    ) -> Result<(), DatabaseError> {
        let mut reports = self.reports.lock().unwrap();
        let report = reports.get_mut(report_id).ok_or(DatabaseError::NotFound)?;
        report.status = ReportStatus::Assigned;
        report.assigned_technician_id = Some(technician_id.to_string());
        report.assigned_technician_name = Some(technician_name.to_string());
        Ok(())
    }

    async fn apply_status_update(
        &self,
        report_id: &str,
        status: ReportStatus,
        notes: Option<&str>,
        estimated_completion: Option<&str>,
        technician_id: &str,
        technician_name: &str,
        completed_timestamp: Option<i64>,
    ) -> Result<(), DatabaseError> {
        let mut reports = self.reports.lock().unwrap();
        let report = reports.get_mut(report_id).ok_or(DatabaseError::NotFound)?;
        report.status = status;
        report.technician_notes = notes.map(str::to_string);
        if estimated_completion.is_some() {
            report.estimated_completion = estimated_completion.map(str::to_string);
        }
        if report.assigned_technician_id.is_none() {
            report.assigned_technician_id = Some(technician_id.to_string());
        }
        if report.assigned_technician_name.is_none() {
            report.assigned_technician_name = Some(technician_name.to_string());
        }
        if completed_timestamp.is_some() {
            report.completed_timestamp = completed_timestamp;
        }
        Ok(())
    }

    async fn append_history(
        &self,
        report_id: &str,
        change: &StatusChange,
    ) -> Result<(), DatabaseError> {
        self.history
            .lock()
            .unwrap()
            .entry(report_id.to_string())
            .or_default()
            .push(change.clone());
        Ok(())
    }

    async fn history(&self, report_id: &str) -> Result<Vec<StatusChange>, DatabaseError> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .get(report_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete(&self, report_id: &str) -> Result<(), DatabaseError> {
        self.reports
            .lock()
            .unwrap()
            .remove(report_id)
            .map(|_| ())
            .ok_or(DatabaseError::NotFound)
    }
}

/// Records carry an insertion sequence so that newest-first listings are
/// deterministic even when timestamps collide within a millisecond.
#[derive(Default)]
pub struct MemoryNotificationStore {
    notifications: Mutex<HashMap<String, (u64, Notification)>>,
    seq: std::sync::atomic::AtomicU64,
}

impl MemoryNotificationStore {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .values()
            .map(|(_, n)| n.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &Notification) -> Result<(), DatabaseError> {
        let seq = self
            .seq
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.notifications.lock().unwrap().insert(
            notification.notification_id.clone(),
            (seq, notification.clone()),
        );
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, DatabaseError> {
        let mut matching: Vec<(u64, Notification)> = self
            .notifications
            .lock()
            .unwrap()
            .values()
            .filter(|(_, n)| n.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|(a_seq, a), (b_seq, b)| {
            b.timestamp.cmp(&a.timestamp).then(b_seq.cmp(a_seq))
        });
        Ok(matching.into_iter().map(|(_, n)| n).collect())
    }

    async fn unread_count(&self, user_id: &str) -> Result<i64, DatabaseError> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .values()
            .filter(|(_, n)| n.user_id == user_id && !n.read)
            .count() as i64)
    }

    async fn mark_read(&self, notification_id: &str) -> Result<(), DatabaseError> {
        let mut notifications = self.notifications.lock().unwrap();
        let (_, notification) = notifications
            .get_mut(notification_id)
            .ok_or(DatabaseError::NotFound)?;
        notification.read = true;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<u64, DatabaseError> {
        let mut flipped = 0;
        for (_, notification) in self.notifications.lock().unwrap().values_mut() {
            if notification.user_id == user_id && !notification.read {
                notification.read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn delete(&self, notification_id: &str) -> Result<(), DatabaseError> {
        self.notifications
            .lock()
            .unwrap()
            .remove(notification_id)
            .map(|_| ())
            .ok_or(DatabaseError::NotFound)
    }

    async fn clear_for_user(&self, user_id: &str) -> Result<u64, DatabaseError> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|_, (_, n)| n.user_id != user_id);
        Ok((before - notifications.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryFeedbackStore {
    feedback: Mutex<HashMap<String, Feedback>>,
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn upsert(&self, feedback: &Feedback) -> Result<(), DatabaseError> {
        self.feedback
            .lock()
            .unwrap()
            .insert(feedback.feedback_id.clone(), feedback.clone());
        Ok(())
    }

    async fn find_by_report(&self, report_id: &str) -> Result<Option<Feedback>, DatabaseError> {
        Ok(self
            .feedback
            .lock()
            .unwrap()
            .values()
            .find(|f| f.report_id == report_id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Feedback>, DatabaseError> {
        let mut all: Vec<Feedback> = self.feedback.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(all)
    }
}
