use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "report_category")]
pub enum ReportCategory {
    Electrical,
    Plumbing,
    #[sqlx(rename = "HVAC")]
    #[serde(rename = "HVAC")]
    Hvac,
    Carpentry,
    Painting,
    Furniture,
    Computer,
    Other,
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportCategory::Electrical => "Electrical",
            ReportCategory::Plumbing => "Plumbing",
            ReportCategory::Hvac => "HVAC",
            ReportCategory::Carpentry => "Carpentry",
            ReportCategory::Painting => "Painting",
            ReportCategory::Furniture => "Furniture",
            ReportCategory::Computer => "Computer",
            ReportCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "report_status")]
pub enum ReportStatus {
    Submitted,
    Assigned,
    Acknowledged,
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sqlx(rename = "On Hold")]
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
}

impl ReportStatus {
    /// Allowed lifecycle transitions. Assigned is reachable only from
    /// Submitted, Acknowledged only from Assigned, Completed from any
    /// active state, and Completed is terminal.
    pub fn can_transition_to(self, next: ReportStatus) -> bool {
        use ReportStatus::*;
        matches!(
            (self, next),
            (Submitted, Assigned)
                | (Assigned, Acknowledged)
                | (Assigned | Acknowledged, InProgress | OnHold)
                | (InProgress, OnHold)
                | (OnHold, InProgress)
                | (Assigned | Acknowledged | InProgress | OnHold, Completed)
        )
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportStatus::Submitted => "Submitted",
            ReportStatus::Assigned => "Assigned",
            ReportStatus::Acknowledged => "Acknowledged",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::OnHold => "On Hold",
            ReportStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// Maintenance report record. The technician name is denormalized next to
/// its id for fast read access; both are set together or not at all.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceReport {
    pub report_id: String,
    pub reporter_id: String,
    pub reporter_name: String,
    pub building_block: String,
    pub room_number: String,
    pub category: ReportCategory,
    pub description: String,
    pub status: ReportStatus,
    pub timestamp: i64,
    pub assigned_technician_id: Option<String>,
    pub assigned_technician_name: Option<String>,
    pub completed_timestamp: Option<i64>,
    pub technician_notes: Option<String>,
    /// Free-text completion estimate entered by the technician.
    pub estimated_completion: Option<String>,
    pub image_url: Option<String>,
    pub report_latitude: Option<f64>,
    pub report_longitude: Option<f64>,
}

impl MaintenanceReport {
    pub fn has_location(&self) -> bool {
        self.report_latitude.is_some() && self.report_longitude.is_some()
    }
}

/// One entry of the append-only status history attached to a report.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: ReportStatus,
    pub timestamp: i64,
    pub changed_by: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    #[validate(length(min = 1))]
    pub reporter_id: String,
    pub reporter_name: Option<String>,
    #[validate(length(min = 1, message = "building block is required"))]
    pub building_block: String,
    #[validate(length(min = 1, message = "room number is required"))]
    pub room_number: String,
    pub category: ReportCategory,
    #[validate(length(min = 10, message = "please provide more details (minimum 10 characters)"))]
    pub description: String,
    pub image_url: Option<String>,
    pub report_latitude: Option<f64>,
    pub report_longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignReport {
    #[validate(length(min = 1))]
    pub technician_id: String,
    #[validate(length(min = 1))]
    pub assigned_by_id: String,
    pub assigned_by_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportStatus {
    pub status: ReportStatus,
    pub notes: Option<String>,
    /// Free-text date, validated non-empty for In Progress / On Hold and
    /// never parsed.
    pub estimated_completion: Option<String>,
    #[validate(length(min = 1))]
    pub technician_id: String,
    pub technician_name: Option<String>,
}
