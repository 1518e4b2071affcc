mod feedback_repository;
#[cfg(test)]
pub mod memory;
mod notification_repository;
mod report_repository;
mod user_repository;

use async_trait::async_trait;

use super::models::{
    Feedback, MaintenanceReport, Notification, ReportStatus, StatusChange, User, UserRole,
    UserStatus,
};
use super::DatabaseError;

pub use feedback_repository::PgFeedbackRepository;
pub use notification_repository::PgNotificationRepository;
pub use report_repository::PgReportRepository;
pub use user_repository::PgUserRepository;

/// User directory. Leaf data store; accounts are flipped inactive rather
/// than deleted.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), DatabaseError>;
    async fn find(&self, user_id: &str) -> Result<Option<User>, DatabaseError>;
    /// All users with the given role and status active.
    async fn list_active_by_role(&self, role: UserRole) -> Result<Vec<User>, DatabaseError>;
    async fn list_all(&self) -> Result<Vec<User>, DatabaseError>;
    async fn set_status(&self, user_id: &str, status: UserStatus) -> Result<(), DatabaseError>;
}

/// Report store keyed by the client-generated report id.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn insert(&self, report: &MaintenanceReport) -> Result<(), DatabaseError>;
    async fn find(&self, report_id: &str) -> Result<Option<MaintenanceReport>, DatabaseError>;
    async fn list_all(&self) -> Result<Vec<MaintenanceReport>, DatabaseError>;
    async fn list_by_status(
        &self,
        status: ReportStatus,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError>;
    async fn list_by_reporter(
        &self,
        reporter_id: &str,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError>;
    async fn list_by_technician(
        &self,
        technician_id: &str,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError>;
    /// Sets status to Assigned and both denormalized technician fields in
    /// one write.
    async fn assign(
        &self,
        report_id: &str,
        technician_id: &str,
        technician_name: &str,
    ) -> Result<(), DatabaseError>;
    /// Applies a technician status update: status, notes, estimate,
    /// backfill of missing technician fields, and the completion timestamp
    /// when given.
    #[allow(clippy::too_many_arguments)]
    async fn apply_status_update(
        &self,
        report_id: &str,
        status: ReportStatus,
        notes: Option<&str>,
        estimated_completion: Option<&str>,
        technician_id: &str,
        technician_name: &str,
        completed_timestamp: Option<i64>,
    ) -> Result<(), DatabaseError>;
    async fn append_history(
        &self,
        report_id: &str,
        change: &StatusChange,
    ) -> Result<(), DatabaseError>;
    /// History entries in append order.
    async fn history(&self, report_id: &str) -> Result<Vec<StatusChange>, DatabaseError>;
    async fn delete(&self, report_id: &str) -> Result<(), DatabaseError>;
}

/// Per-user notification records.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<(), DatabaseError>;
    /// Newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, DatabaseError>;
    async fn unread_count(&self, user_id: &str) -> Result<i64, DatabaseError>;
    async fn mark_read(&self, notification_id: &str) -> Result<(), DatabaseError>;
    /// Returns the number of records flipped.
    async fn mark_all_read(&self, user_id: &str) -> Result<u64, DatabaseError>;
    async fn delete(&self, notification_id: &str) -> Result<(), DatabaseError>;
    /// Returns the number of records removed.
    async fn clear_for_user(&self, user_id: &str) -> Result<u64, DatabaseError>;
}

/// Feedback records, one per report, overwritten on resubmission.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn upsert(&self, feedback: &Feedback) -> Result<(), DatabaseError>;
    async fn find_by_report(&self, report_id: &str) -> Result<Option<Feedback>, DatabaseError>;
    async fn list_all(&self) -> Result<Vec<Feedback>, DatabaseError>;
}
