use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewReport,
    TaskAssigned,
    StatusUpdate,
    Feedback,
    ReportConfirmation,
    AdminAlert,
    System,
}

/// Per-user notification record. The read flag starts false and is the
/// only mutable field; the timestamp is set once at creation.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub report_id: Option<String>,
    pub sender_id: Option<String>,
    pub sender_name: Option<String>,
    pub read: bool,
    pub timestamp: i64,
}
