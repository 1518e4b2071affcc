use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::db::models::{MaintenanceReport, ReportStatus};
use crate::error::AppResult;

const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub limit: Option<usize>,
}

/// Aggregate counts plus the most recent reports for one role's view.
/// Recomputed from the full matching set on every request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub recent: Vec<MaintenanceReport>,
}

/// `reports` must already be sorted newest first, as the stores return it.
pub fn summarize(reports: Vec<MaintenanceReport>, limit: usize) -> DashboardSummary {
    let total = reports.len();
    let mut pending = 0;
    let mut in_progress = 0;
    let mut completed = 0;
    for report in &reports {
        match report.status {
            ReportStatus::Submitted | ReportStatus::Assigned => pending += 1,
            ReportStatus::Acknowledged | ReportStatus::InProgress | ReportStatus::OnHold => {
                in_progress += 1
            }
            ReportStatus::Completed => completed += 1,
        }
    }
    let recent = reports.into_iter().take(limit).collect();
    DashboardSummary {
        total,
        pending,
        in_progress,
        completed,
        recent,
    }
}

pub async fn student_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<impl IntoResponse> {
    let reports = state.lifecycle.list_by_reporter(&user_id).await?;
    Ok(Json(summarize(
        reports,
        query.limit.unwrap_or(DEFAULT_RECENT_LIMIT),
    )))
}

pub async fn technician_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<impl IntoResponse> {
    let reports = state.lifecycle.list_by_technician(&user_id).await?;
    Ok(Json(summarize(
        reports,
        query.limit.unwrap_or(DEFAULT_RECENT_LIMIT),
    )))
}

pub async fn admin_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<impl IntoResponse> {
    let reports = state.lifecycle.list_all().await?;
    Ok(Json(summarize(
        reports,
        query.limit.unwrap_or(DEFAULT_RECENT_LIMIT),
    )))
}
