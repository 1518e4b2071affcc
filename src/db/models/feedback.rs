use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "feedback_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    Acknowledgement,
    Complaint,
    Suggestion,
}

/// Feedback left by a reporter on a completed report. Keyed by a value
/// derived from the report id, so resubmission overwrites in place.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub feedback_id: String,
    pub report_id: String,
    pub user_id: String,
    pub user_name: String,
    pub report_title: String,
    pub report_status: super::ReportStatus,
    pub rating: f32,
    pub comments: String,
    pub feedback_type: FeedbackType,
    pub timestamp: i64,
    pub is_acknowledged: bool,
    pub requires_follow_up: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    #[validate(length(min = 1))]
    pub report_id: String,
    #[validate(length(min = 1))]
    pub user_id: String,
    pub user_name: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f32,
    #[validate(length(min = 1))]
    pub comments: String,
    pub feedback_type: FeedbackType,
}
