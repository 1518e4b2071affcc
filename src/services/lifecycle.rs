use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};
use validator::Validate;

use crate::db::models::{
    AssignReport, Feedback, FeedbackType, MaintenanceReport, NewFeedback, NewReport,
    NotificationType, ReportStatus, StatusChange, UpdateReportStatus, UserRole,
};
use crate::db::repositories::{FeedbackStore, ReportStore, UserStore};
use crate::error::{AppError, AppResult};
use crate::events::{Event, EventBus};

use super::dispatcher::NotificationDispatcher;

const SYSTEM_SENDER_ID: &str = "system";
const SYSTEM_SENDER_NAME: &str = "System";

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn generate_report_id() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
    format!("REP-{}-{}", Utc::now().format("%Y%m%d%H%M%S"), suffix)
}

/// First eight characters of a report id, used in notification texts.
fn short_id(report_id: &str) -> &str {
    report_id.get(..8).unwrap_or(report_id)
}

/// A report mutation requested over the API, dispatched as one unit.
#[derive(Debug)]
pub enum ReportCommand {
    Assign {
        report_id: String,
        request: AssignReport,
    },
    UpdateStatus {
        report_id: String,
        request: UpdateReportStatus,
    },
    Delete {
        report_id: String,
    },
    ViewDetails {
        report_id: String,
    },
}

#[derive(Debug)]
pub enum CommandOutcome {
    Report(MaintenanceReport),
    Deleted { report_id: String },
}

/// Owns the report state machine: submission, assignment, status updates,
/// deletion and feedback, together with the notification fan-out each one
/// triggers. All writes are checked against the transition table before
/// they reach the store.
pub struct ReportLifecycle {
    reports: Arc<dyn ReportStore>,
    users: Arc<dyn UserStore>,
    feedback: Arc<dyn FeedbackStore>,
    dispatcher: Arc<NotificationDispatcher>,
    bus: EventBus,
}

impl ReportLifecycle {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        users: Arc<dyn UserStore>,
        feedback: Arc<dyn FeedbackStore>,
        dispatcher: Arc<NotificationDispatcher>,
        bus: EventBus,
    ) -> Self {
        Self {
            reports,
            users,
            feedback,
            dispatcher,
            bus,
        }
    }

    pub async fn dispatch(&self, command: ReportCommand) -> AppResult<CommandOutcome> {
        match command {
            ReportCommand::Assign { report_id, request } => {
                let report = self.assign(&report_id, request).await?;
                Ok(CommandOutcome::Report(report))
            }
            ReportCommand::UpdateStatus { report_id, request } => {
                let report = self.update_status(&report_id, request).await?;
                Ok(CommandOutcome::Report(report))
            }
            ReportCommand::Delete { report_id } => {
                self.delete(&report_id).await?;
                Ok(CommandOutcome::Deleted { report_id })
            }
            ReportCommand::ViewDetails { report_id } => {
                let report = self.view_details(&report_id).await?;
                Ok(CommandOutcome::Report(report))
            }
        }
    }

    pub async fn submit(&self, request: NewReport) -> AppResult<MaintenanceReport> {
        request.validate()?;

        let reporter_name = match request.reporter_name {
            Some(ref name) if !name.trim().is_empty() => name.clone(),
            _ => match self.users.find(&request.reporter_id).await? {
                Some(user) => user.name,
                None => "Unknown".to_string(),
            },
        };

        let report = MaintenanceReport {
            report_id: generate_report_id(),
            reporter_id: request.reporter_id,
            reporter_name,
            building_block: request.building_block,
            room_number: request.room_number,
            category: request.category,
            description: request.description,
            status: ReportStatus::Submitted,
            timestamp: now_millis(),
            assigned_technician_id: None,
            assigned_technician_name: None,
            completed_timestamp: None,
            technician_notes: None,
            estimated_completion: None,
            image_url: request.image_url,
            report_latitude: request.report_latitude,
            report_longitude: request.report_longitude,
        };
        self.reports.insert(&report).await?;
        info!(report_id = %report.report_id, category = %report.category, "report submitted");

        let mut admin_message = format!(
            "{} reported an issue in {}, Room {}",
            report.reporter_name, report.building_block, report.room_number
        );
        if report.has_location() {
            admin_message.push_str(" (location attached)");
        }
        self.dispatcher
            .send_to_role(
                UserRole::Admin,
                &format!("New {} Report", report.category),
                &admin_message,
                NotificationType::NewReport,
                Some(&report.report_id),
                Some(&report.reporter_id),
                Some(&report.reporter_name),
            )
            .await?;
        self.dispatcher
            .send_to_user(
                &report.reporter_id,
                "Report Submitted",
                &format!(
                    "Your {} report has been submitted successfully.",
                    report.category
                ),
                NotificationType::ReportConfirmation,
                Some(&report.report_id),
                Some(SYSTEM_SENDER_ID),
                Some(SYSTEM_SENDER_NAME),
            )
            .await?;

        self.bus.publish(&Event::ReportChanged {
            report: report.clone(),
        });
        Ok(report)
    }

    /// Assigns a technician. Only valid from Submitted; the technician must
    /// be an active staff account.
    pub async fn assign(
        &self,
        report_id: &str,
        request: AssignReport,
    ) -> AppResult<MaintenanceReport> {
        request.validate()?;

        let report = self
            .reports
            .find(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report {report_id}")))?;
        if !report.status.can_transition_to(ReportStatus::Assigned) {
            return Err(AppError::Conflict(format!(
                "cannot assign a report in status {}",
                report.status
            )));
        }

        let technician = self
            .users
            .find(&request.technician_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("unknown technician {}", request.technician_id))
            })?;
        if technician.role != UserRole::Staff || !technician.is_active() {
            return Err(AppError::BadRequest(format!(
                "{} is not an active technician",
                technician.name
            )));
        }

        let assigned_by = request
            .assigned_by_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Administrator".to_string());

        self.reports
            .assign(report_id, &technician.user_id, &technician.name)
            .await?;
        self.reports
            .append_history(
                report_id,
                &StatusChange {
                    status: ReportStatus::Assigned,
                    timestamp: now_millis(),
                    changed_by: assigned_by.clone(),
                    notes: Some(format!("Assigned to {}", technician.name)),
                },
            )
            .await?;
        info!(report_id, technician_id = %technician.user_id, "report assigned");

        self.dispatcher
            .send_to_user(
                &technician.user_id,
                "New Task Assigned",
                &format!(
                    "You've been assigned to fix a {} issue in {}, Room {}",
                    report.category, report.building_block, report.room_number
                ),
                NotificationType::TaskAssigned,
                Some(report_id),
                Some(&request.assigned_by_id),
                Some(&assigned_by),
            )
            .await?;
        self.dispatcher
            .send_to_user(
                &report.reporter_id,
                "Technician Assigned",
                &format!(
                    "Your {} report has been assigned to {}",
                    report.category, technician.name
                ),
                NotificationType::StatusUpdate,
                Some(report_id),
                Some(&request.assigned_by_id),
                Some(&assigned_by),
            )
            .await?;
        self.dispatcher
            .send_to_role(
                UserRole::Admin,
                "Task Assigned",
                &format!(
                    "{} assigned {} to {}",
                    assigned_by, report.category, technician.name
                ),
                NotificationType::AdminAlert,
                Some(report_id),
                Some(&request.assigned_by_id),
                Some(&assigned_by),
            )
            .await?;

        let updated = MaintenanceReport {
            status: ReportStatus::Assigned,
            assigned_technician_id: Some(technician.user_id),
            assigned_technician_name: Some(technician.name),
            ..report
        };
        self.bus.publish(&Event::ReportChanged {
            report: updated.clone(),
        });
        Ok(updated)
    }

    /// Moves a report through its working states. Only the assigned
    /// technician may do this, and In Progress / On Hold require an
    /// estimated completion date.
    pub async fn update_status(
        &self,
        report_id: &str,
        request: UpdateReportStatus,
    ) -> AppResult<MaintenanceReport> {
        request.validate()?;

        // Assigned is only reachable through `assign`, which vets the
        // technician; a status update must never create the assignment.
        if request.status == ReportStatus::Assigned {
            return Err(AppError::Conflict(
                "technicians are assigned through the assignment flow".to_string(),
            ));
        }

        let report = self
            .reports
            .find(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report {report_id}")))?;
        if !report.status.can_transition_to(request.status) {
            return Err(AppError::Conflict(format!(
                "cannot move a report from {} to {}",
                report.status, request.status
            )));
        }
        match report.assigned_technician_id.as_deref() {
            Some(assigned) if assigned == request.technician_id => {}
            Some(_) => {
                return Err(AppError::Authorization(
                    "only the assigned technician can update this report".to_string(),
                ));
            }
            None => {
                return Err(AppError::Authorization(
                    "report has no assigned technician".to_string(),
                ));
            }
        }

        let needs_estimate = matches!(
            request.status,
            ReportStatus::InProgress | ReportStatus::OnHold
        );
        let estimate = request
            .estimated_completion
            .as_deref()
            .filter(|value| !value.trim().is_empty());
        if needs_estimate && estimate.is_none() {
            return Err(AppError::Validation(format!(
                "an estimated completion date is required when moving to {}",
                request.status
            )));
        }

        let technician_name = match request.technician_name {
            Some(ref name) if !name.trim().is_empty() => name.clone(),
            _ => match self.users.find(&request.technician_id).await? {
                Some(user) => user.name,
                None => "Technician".to_string(),
            },
        };

        let now = now_millis();
        let completed_timestamp = (request.status == ReportStatus::Completed).then_some(now);
        self.reports
            .apply_status_update(
                report_id,
                request.status,
                request.notes.as_deref(),
                estimate,
                &request.technician_id,
                &technician_name,
                completed_timestamp,
            )
            .await?;
        self.reports
            .append_history(
                report_id,
                &StatusChange {
                    status: request.status,
                    timestamp: now,
                    changed_by: technician_name.clone(),
                    notes: request.notes.clone(),
                },
            )
            .await?;
        info!(report_id, status = %request.status, "report status updated");

        self.dispatcher
            .send_to_user(
                &report.reporter_id,
                &format!("Status Updated: {}", report.category),
                &format!(
                    "Your maintenance report for {} has been updated to: {}",
                    report.category, request.status
                ),
                NotificationType::StatusUpdate,
                Some(report_id),
                Some(&request.technician_id),
                Some(&technician_name),
            )
            .await?;
        self.dispatcher
            .send_to_role(
                UserRole::Admin,
                "Report Status Updated",
                &format!(
                    "{} updated Report #{} to: {}",
                    technician_name,
                    short_id(report_id),
                    request.status
                ),
                NotificationType::AdminAlert,
                Some(report_id),
                Some(&request.technician_id),
                Some(&technician_name),
            )
            .await?;
        self.dispatcher
            .send_to_user(
                &request.technician_id,
                "Status Update Confirmation",
                &format!(
                    "You updated report #{} to: {}",
                    short_id(report_id),
                    request.status
                ),
                NotificationType::StatusUpdate,
                Some(report_id),
                Some(SYSTEM_SENDER_ID),
                Some(SYSTEM_SENDER_NAME),
            )
            .await?;

        let updated = MaintenanceReport {
            status: request.status,
            technician_notes: request.notes,
            estimated_completion: estimate
                .map(str::to_string)
                .or(report.estimated_completion.clone()),
            assigned_technician_id: report
                .assigned_technician_id
                .clone()
                .or_else(|| Some(request.technician_id.clone())),
            assigned_technician_name: report
                .assigned_technician_name
                .clone()
                .or_else(|| Some(technician_name.clone())),
            completed_timestamp: completed_timestamp.or(report.completed_timestamp),
            ..report
        };
        self.bus.publish(&Event::ReportChanged {
            report: updated.clone(),
        });
        Ok(updated)
    }

    /// Removes a completed report. Active reports cannot be deleted.
    pub async fn delete(&self, report_id: &str) -> AppResult<()> {
        let report = self
            .reports
            .find(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report {report_id}")))?;
        if report.status != ReportStatus::Completed {
            return Err(AppError::Conflict(
                "only completed reports can be deleted".to_string(),
            ));
        }
        self.reports.delete(report_id).await?;
        info!(report_id, "report deleted");
        self.bus.publish(&Event::ReportDeleted {
            report_id: report_id.to_string(),
        });
        Ok(())
    }

    pub async fn view_details(&self, report_id: &str) -> AppResult<MaintenanceReport> {
        self.reports
            .find(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report {report_id}")))
    }

    pub async fn history(&self, report_id: &str) -> AppResult<Vec<StatusChange>> {
        if self.reports.find(report_id).await?.is_none() {
            return Err(AppError::NotFound(format!("report {report_id}")));
        }
        Ok(self.reports.history(report_id).await?)
    }

    pub async fn list_all(&self) -> AppResult<Vec<MaintenanceReport>> {
        Ok(self.reports.list_all().await?)
    }

    pub async fn list_by_status(&self, status: ReportStatus) -> AppResult<Vec<MaintenanceReport>> {
        Ok(self.reports.list_by_status(status).await?)
    }

    pub async fn list_by_reporter(&self, reporter_id: &str) -> AppResult<Vec<MaintenanceReport>> {
        Ok(self.reports.list_by_reporter(reporter_id).await?)
    }

    pub async fn list_by_technician(
        &self,
        technician_id: &str,
    ) -> AppResult<Vec<MaintenanceReport>> {
        Ok(self.reports.list_by_technician(technician_id).await?)
    }

    /// Records reporter feedback on a completed report. One record per
    /// report: resubmission overwrites the previous one.
    pub async fn submit_feedback(&self, request: NewFeedback) -> AppResult<Feedback> {
        request.validate()?;

        let report = self
            .reports
            .find(&request.report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report {}", request.report_id)))?;
        if report.status != ReportStatus::Completed {
            return Err(AppError::Conflict(
                "feedback can only be left on completed reports".to_string(),
            ));
        }
        if report.reporter_id != request.user_id {
            return Err(AppError::Authorization(
                "only the reporter can leave feedback on this report".to_string(),
            ));
        }

        let user_name = match request.user_name {
            Some(ref name) if !name.trim().is_empty() => name.clone(),
            _ => report.reporter_name.clone(),
        };
        let requires_follow_up =
            request.feedback_type == FeedbackType::Complaint && request.rating <= 2.0;

        let feedback = Feedback {
            feedback_id: format!("FDB-{}", report.report_id),
            report_id: report.report_id.clone(),
            user_id: request.user_id,
            user_name,
            report_title: format!(
                "{} - {}, Room {}",
                report.category, report.building_block, report.room_number
            ),
            report_status: report.status,
            rating: request.rating,
            comments: request.comments,
            feedback_type: request.feedback_type,
            timestamp: now_millis(),
            is_acknowledged: false,
            requires_follow_up,
        };
        self.feedback.upsert(&feedback).await?;
        debug!(report_id = %feedback.report_id, "feedback recorded");

        let admin_title = match feedback.feedback_type {
            FeedbackType::Acknowledgement => "Acknowledgement Received".to_string(),
            FeedbackType::Complaint => {
                format!("Complaint Received (Rating: {}/5)", feedback.rating)
            }
            FeedbackType::Suggestion => "Suggestion Received".to_string(),
        };
        self.dispatcher
            .send_to_role(
                UserRole::Admin,
                &admin_title,
                &format!(
                    "{} left feedback on {}",
                    feedback.user_name, feedback.report_title
                ),
                NotificationType::Feedback,
                Some(&feedback.report_id),
                Some(&feedback.user_id),
                Some(&feedback.user_name),
            )
            .await?;
        self.dispatcher
            .send_to_user(
                &feedback.user_id,
                "Feedback Submitted",
                "Thank you for your feedback. It has been submitted successfully.",
                NotificationType::ReportConfirmation,
                Some(&feedback.report_id),
                Some(SYSTEM_SENDER_ID),
                Some(SYSTEM_SENDER_NAME),
            )
            .await?;

        Ok(feedback)
    }

    pub async fn feedback_for_report(&self, report_id: &str) -> AppResult<Feedback> {
        self.feedback
            .find_by_report(report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("feedback for report {report_id}")))
    }

    pub async fn list_feedback(&self) -> AppResult<Vec<Feedback>> {
        Ok(self.feedback.list_all().await?)
    }
}
